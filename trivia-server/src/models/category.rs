//! Question categories

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Categories seeded by `migrate`, as `(id, type)`
pub const DEFAULT_CATEGORIES: [(i64, &str); 6] = [
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

/// Category record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    /// Display label, stored and serialized as `type`
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: i64, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }

    /// The seeded default categories.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(id, kind)| Self::new(*id, *kind))
            .collect()
    }
}

/// Id to label mapping returned to clients, ordered by id
pub type CategoryMap = BTreeMap<i64, String>;

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
