//! Expense categories
//!
//! Entry forms offer a fixed list of categories. Imported and legacy data can
//! carry any other label, which is kept as [`Category::Custom`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Category of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Healthcare,
    Shopping,
    Education,
    Travel,
    Other,
    /// Any label outside the standard list
    Custom(String),
}

impl Category {
    /// The standard categories in form order
    pub const STANDARD: [Category; 10] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Education,
        Category::Travel,
        Category::Other,
    ];

    /// Display name
    pub fn name(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
            Self::Custom(name) => name,
        }
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Parse any non-empty label; standard names match case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        Some(Self::standard(label).unwrap_or_else(|| Self::Custom(label.to_string())))
    }

    /// Look up a standard category by name, case-insensitively
    pub fn standard(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::STANDARD
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .cloned()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a form gets a category outside the standard list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Category::STANDARD.iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unknown category '{}'. Choose one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Strict parse used by entry forms: only standard names are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::standard(s).ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label).ok_or_else(|| serde::de::Error::custom("category cannot be empty"))
    }
}
