//! # parade-query
//!
//! Compiles typed full-text-search predicates into ParadeDB SQL fragments.
//!
//! ParadeDB exposes BM25 search through a custom `@@@` operator and a
//! small set of functions (`paradedb.match`, `paradedb.score`,
//! `paradedb.snippet`). This crate owns the translation from a typed
//! predicate - term, phrase, phrase prefix, fuzzy, or a JSON query
//! document - to the exact fragment and bound parameters that operator
//! grammar expects, including the character escaping that keeps arbitrary
//! user text from being parsed as query syntax and the join-aware
//! resolution of which physical column a predicate lands on.
//!
//! ## Architecture
//!
//! ```text
//! SearchPredicate (field path + kind)
//!     │
//!     ▼
//! QueryCompiler ──→ SchemaRegistry::resolve ──→ "alias"."column" (+ key column)
//!     │                    ▲
//!     │              JoinContext (query-local aliases)
//!     ├──→ escape::escape  (query-grammar special chars)
//!     ▼
//! CompiledExpression { sql, params } ──→ spliced by the caller's query builder
//! ```
//!
//! The crate emits fragments, not statements: building the surrounding
//! SELECT, binding parameters, and executing belong to the caller.
//!
//! ## Quick Start
//!
//! ```
//! use parade_query::{
//!     JoinContext, ModelSchema, QueryCompiler, SchemaRegistry, SearchPredicate,
//! };
//!
//! // Declare the models the query can touch
//! let mut schema = SchemaRegistry::new();
//! schema.register(
//!     ModelSchema::new("item", "catalog_item")
//!         .column("name")
//!         .column("description"),
//! );
//!
//! // One compiler per compilation pass
//! let joins = JoinContext::new("item");
//! let compiler = QueryCompiler::new(&schema, &joins);
//!
//! let expr = compiler
//!     .compile(&SearchPredicate::phrase("description", "plastic keyboard"))
//!     .unwrap();
//! assert_eq!(
//!     expr.sql,
//!     r#""catalog_item"."description" @@@ '"plastic keyboard"'"#
//! );
//! ```
//!
//! ## Properties
//!
//! - **Pure**: compilation is synchronous and referentially transparent -
//!   same predicate plus same join context, same expression. No caching,
//!   no shared mutable state, nothing blocks.
//! - **Concurrent by construction**: compiling independent predicates
//!   from multiple threads is safe; the only shared input is the join
//!   context, which the crate never mutates.
//! - **Fail-fast**: unresolvable field paths and unserializable documents
//!   error at compile time, never at query execution.
//!
//! ## Modules
//!
//! - [`predicate`]: the [`SearchPredicate`] AST and [`QueryDocument`] forms
//! - [`schema`]: model registry, join context, column resolution
//! - [`compiler`]: predicate-to-fragment compilation
//! - [`escape`]: query-grammar character escaping
//! - [`annotate`]: [`Score`] and [`Highlight`] result annotations
//! - [`config`]: fuzzy and highlight tunables

pub mod annotate;
pub mod compiler;
pub mod config;
pub mod escape;
pub mod predicate;
pub mod schema;

pub use annotate::{Highlight, Score};
pub use compiler::{
    CompileError, CompiledExpression, QueryCompiler, SqlParam, MATCH_OPERATOR,
};
pub use config::{FuzzyOptions, HighlightOptions};
pub use predicate::{FieldPath, PredicateKind, QueryDocument, SearchPredicate};
pub use schema::{
    ColumnRef, JoinContext, ModelSchema, ResolvedField, SchemaError, SchemaRegistry,
};
