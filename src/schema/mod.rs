// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Join-aware column resolution.
//!
//! Maps a predicate's logical field path onto the physical
//! `"table"."column"` reference the engine should compare against, walking
//! relationship joins declared in a [`SchemaRegistry`] and honoring the
//! query-local alias assignment in a [`JoinContext`].
//!
//! Resolution is a direct lookup against declared schema - the physical
//! reference is computed from the predicate's logical position in the
//! query, never recovered by parsing an already-rendered SQL fragment.
//!
//! # Example
//!
//! ```
//! use parade_query::{JoinContext, ModelSchema, SchemaRegistry};
//!
//! let mut schema = SchemaRegistry::new();
//! schema.register(ModelSchema::new("item", "catalog_item").column("description"));
//! schema.register(
//!     ModelSchema::new("review", "catalog_review")
//!         .column("review")
//!         .relation("item", "item"),
//! );
//!
//! // A review query joining into item; the query builder assigned "T2"
//! let joins = JoinContext::new("review").alias("item", "T2");
//!
//! let resolved = schema.resolve(&"item.description".into(), &joins).unwrap();
//! assert_eq!(resolved.column.to_string(), r#""T2"."description""#);
//! assert_eq!(resolved.primary_key.to_string(), r#""T2"."id""#);
//! ```
//!
//! # Design
//!
//! - **Query-local aliases**: a [`ColumnRef`] is recomputed per
//!   compilation and never cached; the same predicate resolves differently
//!   under different alias assignments.
//! - **Owning-table key**: every resolution also yields the primary-key
//!   column of the table that owns the terminal field, qualified with the
//!   same alias. Fuzzy matching and score annotation compare the document
//!   identifier rather than the text column.
//! - **Read-only context**: resolution never mutates the [`JoinContext`].

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::predicate::FieldPath;

/// Default primary-key column for registered models.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Field-path resolution failure. Fatal to the single predicate being
/// compiled; surfaced to the caller immediately, never retried.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),
    #[error("'{relation}' is not a relation on model '{model}'")]
    UnknownRelation { model: String, relation: String },
    #[error("unknown column '{column}' on model '{model}'")]
    UnknownColumn { model: String, column: String },
}

/// A fully qualified physical column reference.
///
/// Renders as `"table"."column"`. The `table` part is a query-local alias,
/// so references are recomputed per compilation rather than stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Table alias (or table name where no alias was assigned).
    pub table: String,
    /// Physical column name.
    pub column: String,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\".\"{}\"", self.table, self.column)
    }
}

/// The outcome of resolving one field path: the text column itself and the
/// primary-key column of the table owning it, both under the same alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// The column the predicate targets.
    pub column: ColumnRef,
    /// The owning table's primary-key column.
    pub primary_key: ColumnRef,
}

/// A registered model: table name, primary key, columns and relations.
///
/// Built up fluently at registration time:
///
/// ```
/// use parade_query::ModelSchema;
///
/// let model = ModelSchema::new("review", "catalog_review")
///     .column("review")
///     .column("added")
///     .relation("item", "item");
/// ```
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    table: String,
    primary_key: String,
    columns: Vec<String>,
    relations: HashMap<String, String>,
}

impl ModelSchema {
    /// Create a model with the default `"id"` primary key.
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            columns: Vec::new(),
            relations: HashMap::new(),
        }
    }

    /// Override the primary-key column name.
    #[must_use]
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Declare a plain column.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Declare a relation field pointing at another registered model.
    #[must_use]
    pub fn relation(mut self, field: impl Into<String>, target_model: impl Into<String>) -> Self {
        self.relations.insert(field.into(), target_model.into());
        self
    }

    /// Model name used in field paths and error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Primary-key column name.
    #[must_use]
    pub fn key_column(&self) -> &str {
        &self.primary_key
    }

    fn has_column(&self, column: &str) -> bool {
        self.primary_key == column || self.columns.iter().any(|c| c == column)
    }
}

/// Query-local join-alias assignment.
///
/// Produced by whatever builds the surrounding statement: it knows which
/// alias each join landed on. Keys are join paths in dot notation relative
/// to the root model; the root itself is the empty path. Where no alias is
/// registered, the target table's own name is used, matching how a query
/// builder refers to the first occurrence of a table.
///
/// Treated as read-only for the duration of a compilation pass.
#[derive(Debug, Clone)]
pub struct JoinContext {
    root_model: String,
    aliases: HashMap<String, String>,
}

impl JoinContext {
    /// Context for a query rooted at `root_model`, with no aliases.
    #[must_use]
    pub fn new(root_model: impl Into<String>) -> Self {
        Self {
            root_model: root_model.into(),
            aliases: HashMap::new(),
        }
    }

    /// Assign an alias to a join path (e.g. `"item"` or `"item.author"`).
    #[must_use]
    pub fn alias(mut self, join_path: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(join_path.into(), alias.into());
        self
    }

    /// Assign an alias to the root table itself.
    #[must_use]
    pub fn root_alias(self, alias: impl Into<String>) -> Self {
        self.alias("", alias)
    }

    /// The model the query is rooted at.
    #[must_use]
    pub fn root_model(&self) -> &str {
        &self.root_model
    }

    fn alias_for(&self, join_path: &str) -> Option<&str> {
        self.aliases.get(join_path).map(String::as_str)
    }
}

/// Registry of models available to resolution.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    models: HashMap<String, ModelSchema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model, replacing any previous one of the same name.
    pub fn register(&mut self, model: ModelSchema) {
        self.models.insert(model.name.clone(), model);
    }

    /// Look up a registered model by name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&ModelSchema> {
        self.models.get(name)
    }

    /// Resolve a field path against the context's root model.
    ///
    /// Walks each non-terminal segment as a relation, requires the terminal
    /// segment to be a column (or the primary key) of the model reached,
    /// and qualifies both the column and the owning table's key with the
    /// alias assigned to that join path.
    pub fn resolve(
        &self,
        path: &FieldPath,
        joins: &JoinContext,
    ) -> Result<ResolvedField, SchemaError> {
        let mut model = self.root(joins)?;
        let mut walked = Vec::with_capacity(path.joins().len());

        for segment in path.joins() {
            let target = model.relations.get(segment).ok_or_else(|| {
                SchemaError::UnknownRelation {
                    model: model.name.clone(),
                    relation: segment.clone(),
                }
            })?;
            model = self
                .models
                .get(target)
                .ok_or_else(|| SchemaError::UnknownModel(target.clone()))?;
            walked.push(segment.as_str());
        }

        let field = path.field();
        if !model.has_column(field) {
            return Err(SchemaError::UnknownColumn {
                model: model.name.clone(),
                column: field.to_string(),
            });
        }

        let alias = joins
            .alias_for(&walked.join("."))
            .unwrap_or_else(|| model.table())
            .to_string();

        Ok(ResolvedField {
            column: ColumnRef {
                table: alias.clone(),
                column: field.to_string(),
            },
            primary_key: ColumnRef {
                table: alias,
                column: model.primary_key.clone(),
            },
        })
    }

    /// Resolve the root model's primary-key column under its alias.
    pub fn resolve_root_key(&self, joins: &JoinContext) -> Result<ColumnRef, SchemaError> {
        let model = self.root(joins)?;
        let alias = joins.alias_for("").unwrap_or_else(|| model.table());
        Ok(ColumnRef {
            table: alias.to_string(),
            column: model.primary_key.clone(),
        })
    }

    fn root(&self, joins: &JoinContext) -> Result<&ModelSchema, SchemaError> {
        self.models
            .get(joins.root_model())
            .ok_or_else(|| SchemaError::UnknownModel(joins.root_model().to_string()))
    }
}
