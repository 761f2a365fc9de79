use serde_derive::Deserialize;
use time::Date;

/// Field value that historical data files stored either as a single string
/// or as a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Raw holiday entry as stored in the JSON data files. Older files used
/// `country`/`category` singular, so both spellings are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayEntry {
    /// Year-agnostic "MM-DD".
    pub date: String,
    pub name: String,
    #[serde(default, alias = "country")]
    pub countries: OneOrMany,
    #[serde(default, alias = "category")]
    pub categories: OneOrMany,
}

/// Holiday entry projected onto its next occurrence.
#[derive(Debug, Clone)]
pub struct ResolvedHoliday {
    pub date: String,
    pub name: String,
    pub countries: Vec<String>,
    pub categories: Vec<String>,
    /// Data file the entry came from, or [`DYNAMIC_SOURCE`](crate::holidays::DYNAMIC_SOURCE).
    pub source: String,
    pub occurrence: Date,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_list_fields() {
        let entry: HolidayEntry = serde_json::from_str(
            r#"{"date": "01-01", "name": "New Year", "countries": ["world"], "categories": ["International"]}"#,
        )
        .unwrap();

        assert_eq!(entry.countries.into_vec(), vec!["world"]);
        assert_eq!(entry.categories.into_vec(), vec!["International"]);
    }

    #[test]
    fn singular_string_fields() {
        let entry: HolidayEntry = serde_json::from_str(
            r#"{"date": "03-08", "name": "Women's Day", "country": "russia", "category": "National"}"#,
        )
        .unwrap();

        assert_eq!(entry.countries.into_vec(), vec!["russia"]);
        assert_eq!(entry.categories.into_vec(), vec!["National"]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let entry: HolidayEntry =
            serde_json::from_str(r#"{"date": "05-01", "name": "Labour Day"}"#).unwrap();

        assert!(entry.countries.into_vec().is_empty());
        assert!(entry.categories.into_vec().is_empty());
    }
}
