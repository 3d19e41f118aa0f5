//! Product category inference.
//!
//! The backend catalog has no category field, so categories are inferred
//! client-side from the free-text product description. Products matching no
//! keyword land in [`Category::Other`] rather than disappearing from
//! filtered views.

use serde::{Deserialize, Serialize};

/// Keyword table for category inference. First match wins.
const KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Soccer, &["soccer", "goalkeeper", "cleat", "futsal"]),
    (Category::Basketball, &["basketball", "hoop"]),
    (Category::Running, &["running", "runner", "marathon", "jogging"]),
    (Category::Fitness, &["fitness", "yoga", "gym", "dumbbell"]),
];

/// A product category.
///
/// [`Category::All`] is a filter value that matches every product; it is
/// never produced by inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Soccer,
    Basketball,
    Running,
    Fitness,
    Other,
}

impl Category {
    /// Infer a category from a product description.
    ///
    /// Matching is case-insensitive substring search over the keyword table.
    /// Descriptions matching no keyword return [`Category::Other`].
    #[must_use]
    pub fn infer(description: &str) -> Self {
        let haystack = description.to_lowercase();
        for (category, keywords) in KEYWORDS {
            if keywords.iter().any(|k| haystack.contains(k)) {
                return *category;
            }
        }
        Self::Other
    }

    /// Returns `true` if a product with this description belongs to `self`.
    #[must_use]
    pub fn matches(self, description: &str) -> bool {
        match self {
            Self::All => true,
            other => Self::infer(description) == other,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Soccer => write!(f, "soccer"),
            Self::Basketball => write!(f, "basketball"),
            Self::Running => write!(f, "running"),
            Self::Fitness => write!(f, "fitness"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "soccer" => Ok(Self::Soccer),
            "basketball" => Ok(Self::Basketball),
            "running" => Ok(Self::Running),
            "fitness" => Ok(Self::Fitness),
            "other" => Ok(Self::Other),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}
