use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const UNKNOWN: &str = "unknown";
const UNPARSEABLE_ELIXIR: &str = "?";

/// One `{name, link}` pair from a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub name: String,
    pub link: String,
}

/// Elixir cost: a number, or `"?"` when the page text was not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elixir {
    Known(u32),
    Unparseable,
}

impl Default for Elixir {
    fn default() -> Self {
        Elixir::Known(0)
    }
}

impl Serialize for Elixir {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Elixir::Known(n) => serializer.serialize_u32(*n),
            Elixir::Unparseable => serializer.serialize_str(UNPARSEABLE_ELIXIR),
        }
    }
}

impl<'de> Deserialize<'de> for Elixir {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ElixirVisitor;

        impl Visitor<'_> for ElixirVisitor {
            type Value = Elixir;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a non-negative integer or \"?\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Elixir, E> {
                u32::try_from(v)
                    .map(Elixir::Known)
                    .map_err(|_| E::custom(format!("elixir cost out of range: {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Elixir, E> {
                u32::try_from(v)
                    .map(Elixir::Known)
                    .map_err(|_| E::custom(format!("elixir cost out of range: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Elixir, E> {
                if v == UNPARSEABLE_ELIXIR {
                    Ok(Elixir::Unparseable)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(ElixirVisitor)
    }
}

/// Attack range class. Never carries the raw page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangeClass {
    Melee,
    Ranged,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

/// Canonical catalog entry for one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,
    pub elixir: Elixir,
    pub rarity: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub target: String,
    pub range: RangeClass,
    pub speed: String,
    pub hit_speed: f64,
    pub release_year: i32,
    pub image: String,
}

/// Lowercase, spaces to underscores, periods dropped: `"Mini P.E.K.K.A"` → `"mini_pekka"`.
pub fn card_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "_").replace('.', "")
}

pub fn image_path(id: &str) -> String {
    format!("images/cards/{}.png", id)
}

/// Starts from a fully defaulted record; each setter overrides one field.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    name: String,
    elixir: Elixir,
    rarity: String,
    card_type: String,
    target: String,
    range: RangeClass,
    speed: String,
    hit_speed: f64,
    release_year: i32,
}

impl RecordBuilder {
    pub fn new(name: &str) -> Self {
        RecordBuilder {
            name: name.trim().to_string(),
            elixir: Elixir::default(),
            rarity: String::new(),
            card_type: String::new(),
            target: UNKNOWN.to_string(),
            range: RangeClass::default(),
            speed: UNKNOWN.to_string(),
            hit_speed: 0.0,
            release_year: 0,
        }
    }

    pub fn elixir(&mut self, elixir: Elixir) -> &mut Self {
        self.elixir = elixir;
        self
    }

    pub fn rarity(&mut self, rarity: &str) -> &mut Self {
        self.rarity = rarity.to_string();
        self
    }

    pub fn card_type(&mut self, card_type: &str) -> &mut Self {
        self.card_type = card_type.to_string();
        self
    }

    pub fn target(&mut self, target: &str) -> &mut Self {
        self.target = target.to_string();
        self
    }

    pub fn range(&mut self, range: RangeClass) -> &mut Self {
        self.range = range;
        self
    }

    pub fn speed(&mut self, speed: &str) -> &mut Self {
        self.speed = speed.to_string();
        self
    }

    pub fn hit_speed(&mut self, hit_speed: f64) -> &mut Self {
        self.hit_speed = hit_speed;
        self
    }

    pub fn release_year(&mut self, year: i32) -> &mut Self {
        self.release_year = year;
        self
    }

    /// `id` and `image` are derived from the name here, after all overrides.
    pub fn build(&self) -> Record {
        let id = card_id(&self.name);
        let image = image_path(&id);
        Record {
            id,
            name: self.name.clone(),
            elixir: self.elixir,
            rarity: self.rarity.clone(),
            card_type: self.card_type.clone(),
            target: self.target.clone(),
            range: self.range,
            speed: self.speed.clone(),
            hit_speed: self.hit_speed,
            release_year: self.release_year,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fully_populated() {
        let r = RecordBuilder::new("  Knight ").build();
        assert_eq!(r.id, "knight");
        assert_eq!(r.name, "Knight");
        assert_eq!(r.elixir, Elixir::Known(0));
        assert_eq!(r.rarity, "");
        assert_eq!(r.card_type, "");
        assert_eq!(r.target, "unknown");
        assert_eq!(r.range, RangeClass::Unknown);
        assert_eq!(r.speed, "unknown");
        assert_eq!(r.hit_speed, 0.0);
        assert_eq!(r.release_year, 0);
        assert_eq!(r.image, "images/cards/knight.png");
    }

    #[test]
    fn card_ids() {
        assert_eq!(card_id("Mini P.E.K.K.A"), "mini_pekka");
        assert_eq!(card_id("Hog Rider"), "hog_rider");
        assert_eq!(card_id("X-Bow"), "x-bow");
        assert_eq!(card_id("The Log"), "the_log");
    }

    #[test]
    fn card_id_idempotent() {
        for name in ["Mini P.E.K.K.A", "Royal Giant", "Zap"] {
            let once = card_id(name);
            assert_eq!(card_id(&once), once);
        }
    }

    #[test]
    fn json_field_names() {
        let mut b = RecordBuilder::new("Hog Rider");
        b.elixir(Elixir::Known(4)).card_type("Troop").hit_speed(1.6).release_year(2016);
        let v = serde_json::to_value(b.build()).unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in [
            "id", "name", "elixir", "rarity", "type", "target", "range", "speed", "hitSpeed",
            "releaseYear", "image",
        ] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(v["elixir"], 4);
        assert_eq!(v["type"], "Troop");
        assert_eq!(v["releaseYear"], 2016);
        assert_eq!(v["range"], "unknown");
    }

    #[test]
    fn unparseable_elixir_is_question_mark() {
        let mut b = RecordBuilder::new("Mirror");
        b.elixir(Elixir::Unparseable);
        let v = serde_json::to_value(b.build()).unwrap();
        assert_eq!(v["elixir"], "?");
    }

    #[test]
    fn elixir_reads_back() {
        assert_eq!(serde_json::from_str::<Elixir>("7").unwrap(), Elixir::Known(7));
        assert_eq!(serde_json::from_str::<Elixir>("\"?\"").unwrap(), Elixir::Unparseable);
        assert!(serde_json::from_str::<Elixir>("\"seven\"").is_err());
        assert!(serde_json::from_str::<Elixir>("-1").is_err());
    }

    #[test]
    fn range_class_names() {
        assert_eq!(serde_json::to_string(&RangeClass::Melee).unwrap(), "\"Melee\"");
        assert_eq!(serde_json::to_string(&RangeClass::Ranged).unwrap(), "\"Ranged\"");
        assert_eq!(serde_json::to_string(&RangeClass::Unknown).unwrap(), "\"unknown\"");
    }
}
