// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Predicate AST for ParadeDB search compilation.
//!
//! Provides a type-safe way to express one search condition per filter:
//! which field it targets (possibly through relationship joins) and what
//! kind of match the engine should perform.
//!
//! Predicate kinds form a closed set dispatched by the compiler; there is
//! no open registry to extend at runtime.
//!
//! # Example
//!
//! ```
//! use parade_query::{QueryDocument, SearchPredicate};
//!
//! // Simple term match on the root model
//! let p = SearchPredicate::term("description", "shoes");
//!
//! // Phrase match on a field reached through a join
//! let p = SearchPredicate::phrase("item.description", "plastic keyboard");
//!
//! // Fuzzy match with the shipped defaults (any term, distance 2)
//! let p = SearchPredicate::fuzzy_term("description", "ruining shoez");
//!
//! // Raw query document, passed to the engine verbatim
//! let p = SearchPredicate::json(
//!     "description",
//!     QueryDocument::raw(r#"{"term": {"field": "description", "value": "keyboard"}}"#),
//! );
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::FuzzyOptions;

/// Logical path to a field: zero or more relation segments followed by the
/// terminal field name, written in dot notation.
///
/// `"description"` targets a column on the root model;
/// `"item.description"` traverses the `item` relation first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dot-notation path. Always yields at least one segment.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// All segments, joins first, terminal field last.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The relation segments leading up to the terminal field.
    #[must_use]
    pub fn joins(&self) -> &[String] {
        self.segments.split_last().map_or(&[], |(_, joins)| joins)
    }

    /// The terminal field name.
    #[must_use]
    pub fn field(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

/// A query document for the engine's JSON-based query syntax.
///
/// Two explicit surface forms, chosen by the caller:
///
/// - [`QueryDocument::Raw`] - an already-serialized document string,
///   passed through verbatim. No validation and no structural escaping is
///   performed; a malformed document surfaces as an engine-side parse
///   error at execution time.
/// - [`QueryDocument::Value`] - a native nested value, serialized
///   losslessly at compile time.
///
/// Both forms produce the same wire literal for the same document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryDocument {
    /// Pre-serialized document, assumed syntactically valid.
    Raw(String),
    /// Native nested structure, serialized canonically.
    Value(Value),
}

impl QueryDocument {
    /// Wrap an already-serialized document string.
    pub fn raw(document: impl Into<String>) -> Self {
        Self::Raw(document.into())
    }

    /// Wrap a native nested value.
    pub fn value(document: Value) -> Self {
        Self::Value(document)
    }
}

impl From<&str> for QueryDocument {
    fn from(document: &str) -> Self {
        Self::Raw(document.to_string())
    }
}

impl From<String> for QueryDocument {
    fn from(document: String) -> Self {
        Self::Raw(document)
    }
}

impl From<Value> for QueryDocument {
    fn from(document: Value) -> Self {
        Self::Value(document)
    }
}

/// The closed set of match kinds the compiler understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredicateKind {
    /// Match any of the value's terms: `'<escaped>'`.
    Term(String),
    /// Match the exact phrase: `'"<escaped>"'`.
    Phrase(String),
    /// Phrase whose last term is a prefix: `'"<escaped>"*'`.
    PhrasePrefix(String),
    /// Edit-distance tolerant term match via `paradedb.match`.
    FuzzyTerm {
        value: String,
        options: FuzzyOptions,
    },
    /// Edit-distance tolerant all-terms match via `paradedb.match`.
    FuzzyPhrase {
        value: String,
        options: FuzzyOptions,
    },
    /// JSON query document, inlined as a string literal.
    Json(QueryDocument),
}

/// One search condition: a target field and a match kind.
///
/// Immutable once constructed. Compilation never mutates a predicate, so
/// the same predicate can be compiled against different join contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPredicate {
    /// Logical field path, resolved against the schema at compile time.
    pub field: FieldPath,
    /// What kind of match to perform.
    pub kind: PredicateKind,
}

impl SearchPredicate {
    /// Term match: any of the value's terms.
    pub fn term(field: impl Into<FieldPath>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: PredicateKind::Term(value.into()),
        }
    }

    /// Exact phrase match.
    pub fn phrase(field: impl Into<FieldPath>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: PredicateKind::Phrase(value.into()),
        }
    }

    /// Phrase match where the last term may be a prefix of a longer word.
    pub fn phrase_prefix(field: impl Into<FieldPath>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: PredicateKind::PhrasePrefix(value.into()),
        }
    }

    /// Fuzzy term match with the shipped defaults (any term, distance 2).
    pub fn fuzzy_term(field: impl Into<FieldPath>, value: impl Into<String>) -> Self {
        Self::fuzzy_term_with(field, value, FuzzyOptions::any_term())
    }

    /// Fuzzy term match with explicit options.
    pub fn fuzzy_term_with(
        field: impl Into<FieldPath>,
        value: impl Into<String>,
        options: FuzzyOptions,
    ) -> Self {
        Self {
            field: field.into(),
            kind: PredicateKind::FuzzyTerm {
                value: value.into(),
                options,
            },
        }
    }

    /// Fuzzy phrase match with the shipped defaults (all terms, distance 2).
    pub fn fuzzy_phrase(field: impl Into<FieldPath>, value: impl Into<String>) -> Self {
        Self::fuzzy_phrase_with(field, value, FuzzyOptions::all_terms())
    }

    /// Fuzzy phrase match with explicit options.
    pub fn fuzzy_phrase_with(
        field: impl Into<FieldPath>,
        value: impl Into<String>,
        options: FuzzyOptions,
    ) -> Self {
        Self {
            field: field.into(),
            kind: PredicateKind::FuzzyPhrase {
                value: value.into(),
                options,
            },
        }
    }

    /// JSON query document match.
    pub fn json(field: impl Into<FieldPath>, document: impl Into<QueryDocument>) -> Self {
        Self {
            field: field.into(),
            kind: PredicateKind::Json(document.into()),
        }
    }

    /// Stable name of the predicate kind, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            PredicateKind::Term(_) => "term",
            PredicateKind::Phrase(_) => "phrase",
            PredicateKind::PhrasePrefix(_) => "phrase_prefix",
            PredicateKind::FuzzyTerm { .. } => "fuzzy_term",
            PredicateKind::FuzzyPhrase { .. } => "fuzzy_phrase",
            PredicateKind::Json(_) => "json",
        }
    }
}
