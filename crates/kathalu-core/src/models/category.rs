use serde::{Deserialize, Serialize};

/// Story category offered by the corpus service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    /// Find a category by id or by case-insensitive name.
    pub fn find<'a>(categories: &'a [Category], key: &str) -> Option<&'a Category> {
        categories
            .iter()
            .find(|c| c.id == key)
            .or_else(|| categories.iter().find(|c| c.name.eq_ignore_ascii_case(key)))
    }
}
