use serde_derive::Deserialize;

use crate::models::holiday::OneOrMany;

/// Category names used in the guild events file.
pub const CATEGORY_BIRTHDAY: &str = "Birthday";
pub const CATEGORY_CHALLENGE: &str = "Challenge";
pub const CATEGORY_HERO: &str = "Hero";

/// Guild event entry: a birthday, an active challenge, or a celebrated hero.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildEvent {
    /// "MM-DD" for a single day, "MM-DD:MM-DD" for a range. Ranges may wrap
    /// the year boundary ("12-19:01-20").
    pub date: String,
    pub name: String,
    #[serde(default, alias = "category")]
    pub categories: OneOrMany,
    #[serde(default, alias = "country")]
    pub countries: OneOrMany,
}

impl GuildEvent {
    pub fn has_category(&self, category: &str) -> bool {
        match &self.categories {
            OneOrMany::One(c) => c == category,
            OneOrMany::Many(cs) => cs.iter().any(|c| c == category),
        }
    }
}
