// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Lookup fragment emission: term, phrase, phrase-prefix and fuzzy.
//!
//! Term, phrase and prefix variants compare the resolved text column
//! against an escaped literal. The fuzzy variants instead compare the
//! owning table's primary-key column against a `paradedb.match(...)` call,
//! binding the column name and the escaped value as parameters and
//! inlining conjunction mode and distance as literals.

use crate::config::FuzzyOptions;
use crate::escape::escape;
use crate::schema::ResolvedField;

use super::{CompiledExpression, SqlParam, MATCH_OPERATOR};

pub(super) fn term(resolved: &ResolvedField, value: &str) -> CompiledExpression {
    CompiledExpression {
        sql: format!(
            "{} {} '{}'",
            resolved.column,
            MATCH_OPERATOR,
            escape(value)
        ),
        params: Vec::new(),
    }
}

pub(super) fn phrase(resolved: &ResolvedField, value: &str) -> CompiledExpression {
    CompiledExpression {
        sql: format!(
            "{} {} '\"{}\"'",
            resolved.column,
            MATCH_OPERATOR,
            escape(value)
        ),
        params: Vec::new(),
    }
}

pub(super) fn phrase_prefix(resolved: &ResolvedField, value: &str) -> CompiledExpression {
    CompiledExpression {
        sql: format!(
            "{} {} '\"{}\"*'",
            resolved.column,
            MATCH_OPERATOR,
            escape(value)
        ),
        params: Vec::new(),
    }
}

pub(super) fn fuzzy(
    resolved: &ResolvedField,
    value: &str,
    options: &FuzzyOptions,
) -> CompiledExpression {
    CompiledExpression {
        sql: format!(
            "{} {} paradedb.match(field => $1, value => $2, \
             conjunction_mode => {}, distance => {})",
            resolved.primary_key, MATCH_OPERATOR, options.conjunction_mode, options.distance
        ),
        params: vec![
            SqlParam::Text(resolved.column.column.clone()),
            SqlParam::Text(escape(value)),
        ],
    }
}
