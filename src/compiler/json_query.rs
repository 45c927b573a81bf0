//! JSON query-document emission.
//!
//! Serializes a [`QueryDocument`] as a single string literal on the right
//! of the match operator. Raw documents pass through verbatim; native
//! values serialize canonically. In both cases the only literal protection
//! applied is doubling embedded single quotes - the document body is
//! inlined, not parameter-bound. Callers own the trust boundary: document
//! content must come from the application, not from an attacker.
//!
//! The document's `field` keys name engine fields as data; they are never
//! resolved or quoted as SQL identifiers.

use crate::predicate::QueryDocument;
use crate::schema::ResolvedField;

use super::{CompileError, CompiledExpression, MATCH_OPERATOR};

pub(super) fn compile(
    resolved: &ResolvedField,
    document: &QueryDocument,
) -> Result<CompiledExpression, CompileError> {
    let body = match document {
        QueryDocument::Raw(raw) => raw.clone(),
        QueryDocument::Value(value) => serde_json::to_string(value)?,
    };

    Ok(CompiledExpression {
        sql: format!(
            "{} {} '{}'",
            resolved.column,
            MATCH_OPERATOR,
            body.replace('\'', "''")
        ),
        params: Vec::new(),
    })
}
