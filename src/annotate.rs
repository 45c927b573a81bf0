// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Result annotations: score and highlight.
//!
//! Thin emitters over the schema's resolution API. Score emits the
//! engine's ranking function against a table key; Highlight wraps matched
//! terms in markup via the engine's snippet function. Both are annotation
//! columns selected alongside results, not filter conditions - the
//! surrounding query builder splices them into the select list.
//!
//! # Example
//!
//! ```
//! use parade_query::{Highlight, JoinContext, ModelSchema, SchemaRegistry, Score};
//!
//! let mut schema = SchemaRegistry::new();
//! schema.register(ModelSchema::new("item", "catalog_item").column("description"));
//! let joins = JoinContext::new("item");
//!
//! let score = Score::new().to_sql(&schema, &joins).unwrap();
//! assert_eq!(score.sql, r#"paradedb.score("catalog_item"."id")"#);
//!
//! let hl = Highlight::new("description").to_sql(&schema, &joins).unwrap();
//! assert_eq!(
//!     hl.sql,
//!     r#"paradedb.snippet("catalog_item"."description", start_tag => $1, end_tag => $2)"#
//! );
//! ```

use crate::compiler::{CompileError, CompiledExpression, SqlParam};
use crate::config::HighlightOptions;
use crate::predicate::FieldPath;
use crate::schema::{JoinContext, SchemaRegistry};

/// BM25 score annotation.
///
/// With no field, scores the query's root model; with a field path, scores
/// the model owning that field (useful when the match condition sits on a
/// joined table).
#[derive(Debug, Clone, Default)]
pub struct Score {
    field: Option<FieldPath>,
}

impl Score {
    /// Score the root model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score the model owning the given field.
    pub fn field(path: impl Into<FieldPath>) -> Self {
        Self {
            field: Some(path.into()),
        }
    }

    /// Emit the ranking function call against the resolved key column.
    pub fn to_sql(
        &self,
        schema: &SchemaRegistry,
        joins: &JoinContext,
    ) -> Result<CompiledExpression, CompileError> {
        let key = match &self.field {
            Some(path) => schema.resolve(path, joins)?.primary_key,
            None => schema.resolve_root_key(joins)?,
        };
        Ok(CompiledExpression {
            sql: format!("paradedb.score({key})"),
            params: Vec::new(),
        })
    }
}

/// Highlight annotation: matched terms wrapped in markup tags.
#[derive(Debug, Clone)]
pub struct Highlight {
    field: FieldPath,
    options: HighlightOptions,
}

impl Highlight {
    /// Highlight matches in the given field with `<em>` markup.
    pub fn new(field: impl Into<FieldPath>) -> Self {
        Self {
            field: field.into(),
            options: HighlightOptions::default(),
        }
    }

    /// Override the markup tags.
    #[must_use]
    pub fn tags(mut self, start_tag: impl Into<String>, end_tag: impl Into<String>) -> Self {
        self.options.start_tag = start_tag.into();
        self.options.end_tag = end_tag.into();
        self
    }

    /// Emit the snippet function call, binding both tags as parameters.
    pub fn to_sql(
        &self,
        schema: &SchemaRegistry,
        joins: &JoinContext,
    ) -> Result<CompiledExpression, CompileError> {
        let resolved = schema.resolve(&self.field, joins)?;
        Ok(CompiledExpression {
            sql: format!(
                "paradedb.snippet({}, start_tag => $1, end_tag => $2)",
                resolved.column
            ),
            params: vec![
                SqlParam::Text(self.options.start_tag.clone()),
                SqlParam::Text(self.options.end_tag.clone()),
            ],
        })
    }
}
