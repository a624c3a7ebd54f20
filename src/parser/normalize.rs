use tracing::warn;

use crate::record::{Elixir, RangeClass};

pub fn elixir(text: &str) -> Elixir {
    text.parse::<u32>()
        .map(Elixir::Known)
        .unwrap_or(Elixir::Unparseable)
}

/// "Melee" anywhere wins; otherwise any number means a ranged attacker.
pub fn range(text: &str) -> RangeClass {
    if text.contains("Melee") {
        RangeClass::Melee
    } else if text.parse::<f64>().is_ok() {
        RangeClass::Ranged
    } else {
        RangeClass::Unknown
    }
}

/// First word only; "Fast (90)" → "Fast".
pub fn speed(text: &str) -> &str {
    first_token(text)
}

/// Seconds from "1.1 sec". `None` unless the first word is a finite number >= 0.
pub fn hit_speed(text: &str) -> Option<f64> {
    first_token(text)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Year from the last four characters of a date like "January 4, 2016".
pub fn release_year(text: &str) -> Option<i32> {
    let count = text.chars().count();
    if count < 4 {
        return None;
    }
    let tail: String = text.chars().skip(count - 4).collect();
    if !tail.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    tail.parse::<i32>().ok()
}

pub fn release_year_or_default(name: &str, text: &str) -> i32 {
    release_year(text).unwrap_or_else(|| {
        warn!(card = name, value = text, "Unparseable release date, using 0");
        0
    })
}

pub fn hit_speed_or_default(name: &str, text: &str) -> f64 {
    hit_speed(text).unwrap_or_else(|| {
        warn!(card = name, value = text, "Unparseable hit speed, using 0");
        0.0
    })
}

fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}
