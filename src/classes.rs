use std::collections::HashMap;

use once_cell::sync::Lazy;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Class spellings seen in the data, mapped to the canonical badge key.
static CLASS_KEYS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("cra", "cra"),
        ("eca", "eca"),
        ("ecaflip", "eca"),
        ("elio", "elio"),
        ("eniripsa", "eni"),
        ("eni", "eni"),
        ("enutrof", "enu"),
        ("enu", "enu"),
        ("feca", "feca"),
        ("forge", "forge"),
        ("forgelance", "forge"),
        ("hupper", "hupper"),
        ("huppermage", "hupper"),
        ("iop", "iop"),
        ("osa", "osa"),
        ("ouginak", "ougi"),
        ("panda", "panda"),
        ("pandawa", "panda"),
        ("roub", "roub"),
        ("roublard", "roub"),
        ("sacri", "sacri"),
        ("sacrieur", "sacri"),
        ("sadida", "sadi"),
        ("sadi", "sadi"),
        ("sram", "sram"),
        ("steamer", "steamer"),
        ("xelor", "xelor"),
        ("zobal", "zobal"),
    ])
});

pub fn class_badge_key(name: &str) -> Option<&'static str> {
    let key = normalize_class_key(name);
    CLASS_KEYS.get(key.as_str()).copied()
}

pub fn class_badge(name: &str) -> String {
    match class_badge_key(name) {
        Some(key) => format!("[{}]", key.to_uppercase()),
        None => name.trim().to_string(),
    }
}

fn normalize_class_key(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
