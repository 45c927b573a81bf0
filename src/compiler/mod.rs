//! Predicate compilation.
//!
//! Turns a [`SearchPredicate`] into the SQL fragment and bound parameters
//! an external query builder splices into the surrounding statement.
//!
//! Dispatch is a single `match` over the closed [`PredicateKind`] set -
//! adding a predicate kind means adding an enum variant and an arm here,
//! not registering into anything at runtime.
//!
//! # Emitted fragments
//!
//! ```text
//! "tbl"."col" @@@ 'shoes'                          -- term
//! "tbl"."col" @@@ '"plastic keyboard"'             -- phrase
//! "tbl"."col" @@@ '"plastic keyb"*'                -- phrase prefix
//! "tbl"."id"  @@@ paradedb.match(field => $1, value => $2,
//!                 conjunction_mode => false, distance => 2)
//! "tbl"."col" @@@ '{"term": {"field": "description", "value": "x"}}'
//! ```
//!
//! Compilation is pure and synchronous: same predicate plus same join
//! context always yields the same expression, nothing blocks, and no state
//! survives the call.

mod json_query;
mod lookup;

use thiserror::Error;
use tracing::trace;

use crate::predicate::{PredicateKind, SearchPredicate};
use crate::schema::{JoinContext, SchemaError, SchemaRegistry};

/// The engine's full-text match operator.
pub const MATCH_OPERATOR: &str = "@@@";

/// A value bound to a positional placeholder in a compiled fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Numeric(f64),
    Boolean(bool),
}

/// A compiled SQL fragment plus its bound parameters, in placeholder
/// order. Placeholders are positional (`$1`, `$2`, …) and numbered from 1
/// within the fragment; the splicing query builder renumbers as it binds.
///
/// Placeholder count always equals parameter count.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    /// The SQL fragment.
    pub sql: String,
    /// Parameter values in placeholder order.
    pub params: Vec<SqlParam>,
}

/// Compilation failure. Deterministic - retrying reproduces the same
/// error, so none of these are retried or swallowed.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Field path did not resolve to a known column or join.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A native query document could not be serialized.
    #[error("malformed query document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Compiles predicates against a schema and a query-local join context.
///
/// Holds only borrows; construct one per compilation pass and drop it with
/// the statement. Compiling independent predicates concurrently is safe -
/// the compiler never mutates either input.
///
/// # Example
///
/// ```
/// use parade_query::{JoinContext, ModelSchema, QueryCompiler, SchemaRegistry, SearchPredicate};
///
/// let mut schema = SchemaRegistry::new();
/// schema.register(ModelSchema::new("item", "catalog_item").column("description"));
///
/// let joins = JoinContext::new("item");
/// let compiler = QueryCompiler::new(&schema, &joins);
///
/// let expr = compiler
///     .compile(&SearchPredicate::term("description", "running shoes"))
///     .unwrap();
/// assert_eq!(expr.sql, r#""catalog_item"."description" @@@ 'running shoes'"#);
/// assert!(expr.params.is_empty());
/// ```
pub struct QueryCompiler<'a> {
    schema: &'a SchemaRegistry,
    joins: &'a JoinContext,
}

impl<'a> QueryCompiler<'a> {
    /// Create a compiler over a schema and join context.
    #[must_use]
    pub fn new(schema: &'a SchemaRegistry, joins: &'a JoinContext) -> Self {
        Self { schema, joins }
    }

    /// Compile one predicate into a fragment and its parameters.
    pub fn compile(
        &self,
        predicate: &SearchPredicate,
    ) -> Result<CompiledExpression, CompileError> {
        let resolved = self.schema.resolve(&predicate.field, self.joins)?;

        let expr = match &predicate.kind {
            PredicateKind::Term(value) => lookup::term(&resolved, value),
            PredicateKind::Phrase(value) => lookup::phrase(&resolved, value),
            PredicateKind::PhrasePrefix(value) => lookup::phrase_prefix(&resolved, value),
            PredicateKind::FuzzyTerm { value, options }
            | PredicateKind::FuzzyPhrase { value, options } => {
                lookup::fuzzy(&resolved, value, options)
            }
            PredicateKind::Json(document) => json_query::compile(&resolved, document)?,
        };

        trace!(
            kind = predicate.kind_name(),
            sql = %expr.sql,
            params = expr.params.len(),
            "compiled predicate"
        );
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ModelSchema;

    fn schema() -> SchemaRegistry {
        let mut schema = SchemaRegistry::new();
        schema.register(ModelSchema::new("item", "catalog_item").column("description"));
        schema
    }

    #[test]
    fn test_term_and_phrase_differ_only_by_embedded_quotes() {
        let schema = schema();
        let joins = JoinContext::new("item");
        let compiler = QueryCompiler::new(&schema, &joins);

        let term = compiler
            .compile(&SearchPredicate::term("description", "plastic keyboard"))
            .unwrap();
        let phrase = compiler
            .compile(&SearchPredicate::phrase("description", "plastic keyboard"))
            .unwrap();

        assert_eq!(
            term.sql,
            r#""catalog_item"."description" @@@ 'plastic keyboard'"#
        );
        assert_eq!(
            phrase.sql,
            r#""catalog_item"."description" @@@ '"plastic keyboard"'"#
        );
    }

    #[test]
    fn test_phrase_prefix_is_phrase_plus_star() {
        let schema = schema();
        let joins = JoinContext::new("item");
        let compiler = QueryCompiler::new(&schema, &joins);

        let prefix = compiler
            .compile(&SearchPredicate::phrase_prefix("description", "plastic keyb"))
            .unwrap();
        assert_eq!(
            prefix.sql,
            r#""catalog_item"."description" @@@ '"plastic keyb"*'"#
        );
    }

    #[test]
    fn test_unknown_field_is_schema_error() {
        let schema = schema();
        let joins = JoinContext::new("item");
        let compiler = QueryCompiler::new(&schema, &joins);

        let err = compiler
            .compile(&SearchPredicate::term("colour", "red"))
            .unwrap_err();
        assert!(matches!(err, CompileError::Schema(_)));
    }

    #[test]
    fn test_placeholder_count_matches_param_count() {
        let schema = schema();
        let joins = JoinContext::new("item");
        let compiler = QueryCompiler::new(&schema, &joins);

        let expr = compiler
            .compile(&SearchPredicate::fuzzy_term("description", "shoez"))
            .unwrap();
        let placeholders = (1..=expr.params.len())
            .filter(|n| expr.sql.contains(&format!("${n}")))
            .count();
        assert_eq!(placeholders, expr.params.len());
    }
}
