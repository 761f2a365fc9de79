use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref COUNTRY_FLAGS: HashMap<&'static str, &'static str> = HashMap::from([
        ("world", "🌍"),
        ("russia", "🇷🇺"),
        ("ukraine", "🇺🇦"),
        ("georgia", "🇬🇪"),
        ("armenia", "🇦🇲"),
        ("kazakhstan", "🇰🇿"),
        ("poland", "🇵🇱"),
        ("turkey", "🇹🇷"),
        ("canada", "🇨🇦"),
        ("usa", "🇺🇸"),
        ("spain", "🇪🇸"),
        ("italy", "🇮🇹"),
        ("france", "🇫🇷"),
        ("portugal", "🇵🇹"),
        ("uae", "🇦🇪"),
        ("israel", "🇮🇱"),
        ("eu", "🇪🇺"),
        ("catholic", "✝️"),
        ("orthodox", "✝️"),
        ("muslim", "☪️"),
        ("jewish", "✡️"),
    ]);
    pub static ref CATEGORY_EMOJIS: HashMap<&'static str, &'static str> = HashMap::from([
        ("Religious", "⛪"),
        ("International", "🌍"),
        ("National", "🎆"),
        ("Memorial", "🕯️"),
        ("Gaming", "🎮"),
        ("Birthday", "🎂"),
        ("Challenge", "🏆"),
        ("Hero", "🦸"),
    ]);
}

/// First country's flag emoji, or the globe fallback.
pub fn country_flag(countries: &[String]) -> &'static str {
    countries
        .first()
        .and_then(|c| COUNTRY_FLAGS.get(c.as_str()))
        .copied()
        .unwrap_or("🌍")
}

/// First category prefixed with its emoji when one is known.
pub fn category_line(categories: &[String]) -> Option<String> {
    let main = categories.first()?;
    Some(match CATEGORY_EMOJIS.get(main.as_str()) {
        Some(emoji) => format!("{emoji} {main}"),
        None => main.clone(),
    })
}
