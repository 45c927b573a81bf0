//! Per-expression tunables for fuzzy matching and highlight markup.
//!
//! Both option types deserialize from configuration with the same defaults
//! the named predicate constructors use, so an application can load its
//! search tuning from a config file and pass it through unchanged.
//!
//! # Example
//!
//! ```
//! use parade_query::FuzzyOptions;
//!
//! // Defaults match the fuzzy-term constructor
//! let opts = FuzzyOptions::default();
//! assert!(!opts.conjunction_mode);
//! assert_eq!(opts.distance, 2);
//!
//! // Loaded from config
//! let opts: FuzzyOptions = serde_json::from_str(r#"{"distance": 1}"#).unwrap();
//! assert_eq!(opts.distance, 1);
//! ```

use serde::{Deserialize, Serialize};

/// Tuning for the engine's fuzzy match function.
///
/// `conjunction_mode` selects whether all terms must match (`true`) or any
/// term suffices (`false`); `distance` is the Levenshtein edit-distance
/// tolerance per term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyOptions {
    /// Require all terms to match (AND) rather than any term (OR).
    #[serde(default)]
    pub conjunction_mode: bool,

    /// Edit-distance tolerance (default: 2).
    #[serde(default = "default_distance")]
    pub distance: u32,
}

fn default_distance() -> u32 {
    2
}

impl FuzzyOptions {
    /// Any-term matching (OR semantics), distance 2.
    #[must_use]
    pub fn any_term() -> Self {
        Self {
            conjunction_mode: false,
            distance: default_distance(),
        }
    }

    /// All-terms matching (AND semantics), distance 2.
    #[must_use]
    pub fn all_terms() -> Self {
        Self {
            conjunction_mode: true,
            distance: default_distance(),
        }
    }

    /// Override the edit-distance tolerance.
    #[must_use]
    pub fn distance(mut self, distance: u32) -> Self {
        self.distance = distance;
        self
    }
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self::any_term()
    }
}

/// Markup tags wrapped around matched terms by the highlight annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightOptions {
    /// Opening tag inserted before each match (default: `<em>`).
    #[serde(default = "default_start_tag")]
    pub start_tag: String,

    /// Closing tag inserted after each match (default: `</em>`).
    #[serde(default = "default_end_tag")]
    pub end_tag: String,
}

fn default_start_tag() -> String {
    "<em>".to_string()
}

fn default_end_tag() -> String {
    "</em>".to_string()
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            start_tag: default_start_tag(),
            end_tag: default_end_tag(),
        }
    }
}
