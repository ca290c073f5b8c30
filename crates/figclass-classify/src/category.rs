//! Figure category taxonomy
//!
//! The taxonomy is closed: every classifier returns one of the seven
//! [`Category`] values, with [`Category::Unknown`] reserved for figures no
//! rule accepts.

use crate::error::ClassifyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic category of a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Continuous-tone picture
    Photograph,
    /// Line drawing, flowchart or schematic
    Diagram,
    /// Data plot
    Chart,
    /// Ruled rows and columns
    Table,
    /// Rendered paragraph of text
    TextBlock,
    /// Small flat pictogram or logo
    Icon,
    /// No rule matched
    Unknown,
}

impl Category {
    /// All categories, `Unknown` last
    pub const ALL: [Category; 7] = [
        Category::Photograph,
        Category::Diagram,
        Category::Chart,
        Category::Table,
        Category::TextBlock,
        Category::Icon,
        Category::Unknown,
    ];

    /// Stable snake_case key
    pub fn key(self) -> &'static str {
        match self {
            Category::Photograph => "photograph",
            Category::Diagram => "diagram",
            Category::Chart => "chart",
            Category::Table => "table",
            Category::TextBlock => "text_block",
            Category::Icon => "icon",
            Category::Unknown => "unknown",
        }
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Category::Photograph => "Photograph or other continuous-tone image",
            Category::Diagram => "Flowchart, schematic or technical drawing",
            Category::Chart => "Bar, line, pie or scatter chart",
            Category::Table => "Structured data in ruled rows and columns",
            Category::TextBlock => "Block of rendered text",
            Category::Icon => "Small icon, logo or pictogram",
            Category::Unknown => "Figure that matches no known category",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ClassifyError::InvalidParameters(format!("unknown category: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for c in Category::ALL {
            assert_eq!(c.key().parse::<Category>().unwrap(), c);
            assert_eq!(c.to_string(), c.key());
        }
        assert!("figure".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_matches_key() {
        let json = serde_json::to_string(&Category::TextBlock).unwrap();
        assert_eq!(json, "\"text_block\"");
        let back: Category = serde_json::from_str("\"icon\"").unwrap();
        assert_eq!(back, Category::Icon);
    }

    #[test]
    fn test_descriptions_present() {
        assert!(Category::ALL.iter().all(|c| !c.description().is_empty()));
    }
}
