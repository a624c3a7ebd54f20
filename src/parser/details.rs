use tracing::debug;

use super::document::Markup;
use super::normalize;
use crate::record::{Record, RecordBuilder};

/// Build the record for one card page. Never fails: anything missing or
/// malformed leaves the field at its default.
pub fn extract(name: &str, doc: &impl Markup) -> Record {
    let mut builder = RecordBuilder::new(name);
    apply_infobox(&mut builder, name, doc);
    apply_attributes(&mut builder, name, doc);
    builder.build()
}

fn apply_infobox(builder: &mut RecordBuilder, name: &str, doc: &impl Markup) {
    let Some(rows) = doc.infobox_rows() else {
        debug!(card = name, "No infobox");
        return;
    };

    for (label, value) in &rows {
        match label.as_str() {
            "Elixir Cost" => {
                builder.elixir(normalize::elixir(value));
            }
            "Rarity" => {
                builder.rarity(value);
            }
            "Type" => {
                builder.card_type(value);
            }
            "Release Date" => {
                builder.release_year(normalize::release_year_or_default(name, value));
            }
            _ => {}
        }
    }
}

fn apply_attributes(builder: &mut RecordBuilder, name: &str, doc: &impl Markup) {
    let Some(table) = doc.attribute_table() else {
        debug!(card = name, "No attributes table");
        return;
    };

    // zip stops at the shorter row
    for (label, value) in table.labels.iter().zip(&table.values) {
        match label.as_str() {
            "Range" => {
                builder.range(normalize::range(value));
            }
            "Target" => {
                builder.target(value);
            }
            "Speed" => {
                builder.speed(normalize::speed(value));
            }
            "Hit Speed" => {
                builder.hit_speed(normalize::hit_speed_or_default(name, value));
            }
            _ => {}
        }
    }
}
