use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static OVERVIEW_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.card-overview"));
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static INFOBOX_SEL: LazyLock<Selector> = LazyLock::new(|| selector("aside.portable-infobox"));
static DIV_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div"));
static LABEL_SEL: LazyLock<Selector> = LazyLock::new(|| selector("h3.pi-data-label"));
static VALUE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.pi-data-value"));
static ATTR_TABLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("#unit-attributes-table"));
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static TH_SEL: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

/// First anchor of a listing block. `text` is trimmed, `href` as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
}

/// Header labels and the first data row, column-positional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeTable {
    pub labels: Vec<String>,
    pub values: Vec<String>,
}

/// What the extractors need from a page, independent of the HTML backend.
pub trait Markup {
    /// First anchor of every card overview block; `None` for blocks without one.
    fn overview_anchors(&self) -> Vec<Option<Anchor>>;
    /// `(label, value)` rows of the infobox, or `None` if the page has no infobox.
    fn infobox_rows(&self) -> Option<Vec<(String, String)>>;
    /// `None` if the table is missing or has no data row.
    fn attribute_table(&self) -> Option<AttributeTable>;
}

pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(markup: &str) -> Self {
        HtmlDocument {
            html: Html::parse_document(markup),
        }
    }
}

impl Markup for HtmlDocument {
    fn overview_anchors(&self) -> Vec<Option<Anchor>> {
        self.html
            .select(&OVERVIEW_SEL)
            .map(|block| {
                block.select(&ANCHOR_SEL).next().map(|a| Anchor {
                    text: a.text().collect::<String>().trim().to_string(),
                    href: a.value().attr("href").map(str::to_string),
                })
            })
            .collect()
    }

    fn infobox_rows(&self) -> Option<Vec<(String, String)>> {
        let infobox = self.html.select(&INFOBOX_SEL).next()?;
        let rows = infobox
            .select(&DIV_SEL)
            .filter_map(|row| {
                let label = row.select(&LABEL_SEL).next()?;
                let value = row.select(&VALUE_SEL).next()?;
                Some((stripped_text(label), stripped_text(value)))
            })
            .collect();
        Some(rows)
    }

    fn attribute_table(&self) -> Option<AttributeTable> {
        let table = self.html.select(&ATTR_TABLE_SEL).next()?;
        let mut rows = table.select(&ROW_SEL);
        let header = rows.next()?;
        let data = rows.next()?;
        Some(AttributeTable {
            labels: header.select(&TH_SEL).map(stripped_text).collect(),
            values: data.select(&TD_SEL).map(stripped_text).collect(),
        })
    }
}

/// Every text node trimmed, empties dropped, joined with no separator.
fn stripped_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripped_text_joins_nodes() {
        let doc = HtmlDocument::parse(
            r#"<table id="unit-attributes-table"><tr><th> Hit Speed </th></tr>
               <tr><td>
                 1.1 sec <span>(first hit)</span>
               </td></tr></table>"#,
        );
        let t = doc.attribute_table().unwrap();
        assert_eq!(t.labels, vec!["Hit Speed"]);
        assert_eq!(t.values, vec!["1.1 sec(first hit)"]);
    }

    #[test]
    fn table_without_data_row() {
        let doc = HtmlDocument::parse(
            r#"<table id="unit-attributes-table"><tr><th>Range</th></tr></table>"#,
        );
        assert!(doc.attribute_table().is_none());
    }

    #[test]
    fn infobox_rows_need_label_and_value() {
        let doc = HtmlDocument::parse(
            r#"<aside class="portable-infobox pi-background">
                 <div class="pi-item pi-data"><h3 class="pi-data-label">Rarity</h3>
                   <div class="pi-data-value">Epic</div></div>
                 <div class="pi-item pi-data"><h3 class="pi-data-label">Orphan</h3></div>
               </aside>"#,
        );
        let rows = doc.infobox_rows().unwrap();
        assert_eq!(rows, vec![("Rarity".to_string(), "Epic".to_string())]);
    }

    #[test]
    fn no_infobox() {
        let doc = HtmlDocument::parse("<html><body><p>stub</p></body></html>");
        assert!(doc.infobox_rows().is_none());
        assert!(doc.attribute_table().is_none());
        assert!(doc.overview_anchors().is_empty());
    }
}
