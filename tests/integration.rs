//! Integration tests for predicate-to-SQL compilation.
//!
//! Exercises the full pipeline - schema registration, join-context
//! resolution, escaping and fragment emission - against the wire shapes
//! the engine expects.
//!
//! # Test Organization
//! - `shape_*` - Exact fragment shapes per predicate kind
//! - `join_*` - Resolution across relationship joins
//! - `escape_*` - Literal safety end to end
//! - `annotate_*` - Score and highlight emission
//! - `error_*` - Resolution failures

use serde_json::json;

use parade_query::{
    Highlight, JoinContext, ModelSchema, QueryCompiler, QueryDocument, SchemaRegistry, Score,
    SearchPredicate, SqlParam,
};

// =============================================================================
// Fixtures
// =============================================================================

/// A catalog of items, each with zero or more reviews pointing back at it.
fn catalog_schema() -> SchemaRegistry {
    let mut schema = SchemaRegistry::new();
    schema.register(
        ModelSchema::new("item", "catalog_item")
            .column("name")
            .column("description")
            .column("alt_name")
            .column("rating"),
    );
    schema.register(
        ModelSchema::new("review", "catalog_review")
            .column("review")
            .column("added")
            .relation("item", "item"),
    );
    schema
}

/// Strip the outer single-quote delimiters from a fragment's RHS and undo
/// quote doubling, returning the embedded literal.
fn embedded_literal(sql: &str) -> String {
    let start = sql.find('\'').expect("opening quote");
    let end = sql.rfind('\'').expect("closing quote");
    sql[start + 1..end].replace("''", "'")
}

// =============================================================================
// Fragment Shapes
// =============================================================================

#[test]
fn shape_term() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::term("description", "shoes"))
        .unwrap();
    assert_eq!(expr.sql, r#""catalog_item"."description" @@@ 'shoes'"#);
    assert!(expr.params.is_empty());
}

#[test]
fn shape_phrase_wraps_value_in_double_quotes() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let term = compiler
        .compile(&SearchPredicate::term("description", "plastic keyboard"))
        .unwrap();
    let phrase = compiler
        .compile(&SearchPredicate::phrase("description", "plastic keyboard"))
        .unwrap();

    assert_eq!(embedded_literal(&term.sql), "plastic keyboard");
    assert_eq!(embedded_literal(&phrase.sql), "\"plastic keyboard\"");
}

#[test]
fn shape_phrase_prefix_appends_star_inside_literal() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::phrase_prefix("description", "plastic keyb"))
        .unwrap();
    assert_eq!(
        expr.sql,
        r#""catalog_item"."description" @@@ '"plastic keyb"*'"#
    );
}

#[test]
fn shape_fuzzy_term_routes_params() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::fuzzy_term("description", "atempted crwe"))
        .unwrap();

    assert_eq!(
        expr.sql,
        r#""catalog_item"."id" @@@ paradedb.match(field => $1, value => $2, conjunction_mode => false, distance => 2)"#
    );
    assert_eq!(
        expr.params,
        vec![
            SqlParam::Text("description".to_string()),
            SqlParam::Text("atempted crwe".to_string()),
        ]
    );
}

#[test]
fn shape_fuzzy_phrase_requires_all_terms() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::fuzzy_phrase(
            "description",
            "atempted crwe",
        ))
        .unwrap();

    assert!(expr.sql.contains("conjunction_mode => true"));
    assert_eq!(
        expr.params,
        vec![
            SqlParam::Text("description".to_string()),
            SqlParam::Text("atempted crwe".to_string()),
        ]
    );
}

#[test]
fn shape_json_raw_and_value_forms_are_equivalent() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let raw = compiler
        .compile(&SearchPredicate::json(
            "description",
            QueryDocument::raw(r#"{"term": {"field": "description", "value": "keyboard"}}"#),
        ))
        .unwrap();
    let value = compiler
        .compile(&SearchPredicate::json(
            "description",
            json!({"term": {"field": "description", "value": "keyboard"}}),
        ))
        .unwrap();

    // Whitespace may differ; parsed structure must not.
    let raw_doc: serde_json::Value = serde_json::from_str(&embedded_literal(&raw.sql)).unwrap();
    let value_doc: serde_json::Value =
        serde_json::from_str(&embedded_literal(&value.sql)).unwrap();
    assert_eq!(raw_doc, value_doc);

    assert!(raw.sql.starts_with(r#""catalog_item"."description" @@@ '"#));
    assert!(value.sql.starts_with(r#""catalog_item"."description" @@@ '"#));
}

#[test]
fn shape_empty_values_compile_to_closed_literals() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let term = compiler
        .compile(&SearchPredicate::term("description", ""))
        .unwrap();
    assert_eq!(term.sql, r#""catalog_item"."description" @@@ ''"#);

    let phrase = compiler
        .compile(&SearchPredicate::phrase("description", ""))
        .unwrap();
    assert_eq!(phrase.sql, r#""catalog_item"."description" @@@ '""'"#);

    let fuzzy = compiler
        .compile(&SearchPredicate::fuzzy_term("description", ""))
        .unwrap();
    assert_eq!(
        fuzzy.params,
        vec![
            SqlParam::Text("description".to_string()),
            SqlParam::Text(String::new()),
        ]
    );
}

// =============================================================================
// Join Resolution
// =============================================================================

#[test]
fn join_predicate_targets_joined_table_alias() {
    let schema = catalog_schema();
    let joins = JoinContext::new("review").alias("item", "T2");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::term("item.description", "Unsourced material"))
        .unwrap();
    assert_eq!(expr.sql, r#""T2"."description" @@@ 'Unsourced material'"#);
}

#[test]
fn join_without_alias_uses_joined_table_name() {
    let schema = catalog_schema();
    let joins = JoinContext::new("review");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::phrase(
            "item.description",
            "Unsourced material",
        ))
        .unwrap();
    assert_eq!(
        expr.sql,
        r#""catalog_item"."description" @@@ '"Unsourced material"'"#
    );
}

#[test]
fn join_fuzzy_keys_on_joined_table() {
    let schema = catalog_schema();
    let joins = JoinContext::new("review").alias("item", "T2");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::fuzzy_term(
            "item.description",
            "Unsourcad matrial",
        ))
        .unwrap();

    assert!(expr.sql.starts_with(r#""T2"."id" @@@ paradedb.match("#));
    assert_eq!(
        expr.params,
        vec![
            SqlParam::Text("description".to_string()),
            SqlParam::Text("Unsourcad matrial".to_string()),
        ]
    );
}

#[test]
fn join_same_predicate_compiles_per_context() {
    // Aliases are query-local: the same predicate resolves differently
    // under different contexts.
    let schema = catalog_schema();
    let predicate = SearchPredicate::term("item.description", "music");

    let first = JoinContext::new("review").alias("item", "T2");
    let second = JoinContext::new("review").alias("item", "T5");

    let a = QueryCompiler::new(&schema, &first)
        .compile(&predicate)
        .unwrap();
    let b = QueryCompiler::new(&schema, &second)
        .compile(&predicate)
        .unwrap();

    assert!(a.sql.starts_with(r#""T2"."#));
    assert!(b.sql.starts_with(r#""T5"."#));
}

// =============================================================================
// Escaping End to End
// =============================================================================

#[test]
fn escape_special_characters_in_term() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::term(
            "description",
            "a:b[c]d(e)f'g\"h-i+j*k^l`m{n}o",
        ))
        .unwrap();
    assert_eq!(
        expr.sql,
        "\"catalog_item\".\"description\" @@@ 'a\\:b\\[c\\]d\\(e\\)f\\'g\\\"h\\-i\\+j\\*k\\^l\\`m\\{n\\}o'"
    );
}

#[test]
fn escape_passthrough_characters_survive() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    for value in ["desc<desc", "desc>desc", "desc~desc", "desc!desc", "desc\\desc"] {
        let expr = compiler
            .compile(&SearchPredicate::term("description", value))
            .unwrap();
        assert_eq!(
            expr.sql,
            format!(r#""catalog_item"."description" @@@ '{value}'"#)
        );
    }
}

#[test]
fn escape_fuzzy_value_param_only() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let expr = compiler
        .compile(&SearchPredicate::fuzzy_term("description", "wi-fi (5GHz)"))
        .unwrap();
    assert_eq!(
        expr.params,
        vec![
            SqlParam::Text("description".to_string()),
            SqlParam::Text("wi\\-fi \\(5GHz\\)".to_string()),
        ]
    );
}

// =============================================================================
// Annotations
// =============================================================================

#[test]
fn annotate_score_root_model() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let expr = Score::new().to_sql(&schema, &joins).unwrap();
    assert_eq!(expr.sql, r#"paradedb.score("catalog_item"."id")"#);
}

#[test]
fn annotate_score_joined_field() {
    let schema = catalog_schema();
    let joins = JoinContext::new("review").alias("item", "T2");
    let expr = Score::field("item.description")
        .to_sql(&schema, &joins)
        .unwrap();
    assert_eq!(expr.sql, r#"paradedb.score("T2"."id")"#);
}

#[test]
fn annotate_highlight_default_and_custom_tags() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");

    let default = Highlight::new("description").to_sql(&schema, &joins).unwrap();
    assert_eq!(
        default.sql,
        r#"paradedb.snippet("catalog_item"."description", start_tag => $1, end_tag => $2)"#
    );
    assert_eq!(
        default.params,
        vec![
            SqlParam::Text("<em>".to_string()),
            SqlParam::Text("</em>".to_string()),
        ]
    );

    let custom = Highlight::new("description")
        .tags("<start>", "<end>")
        .to_sql(&schema, &joins)
        .unwrap();
    assert_eq!(
        custom.params,
        vec![
            SqlParam::Text("<start>".to_string()),
            SqlParam::Text("<end>".to_string()),
        ]
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn error_unknown_column() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let err = compiler
        .compile(&SearchPredicate::term("colour", "red"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown column 'colour' on model 'item'"
    );
}

#[test]
fn error_unknown_relation() {
    let schema = catalog_schema();
    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let err = compiler
        .compile(&SearchPredicate::term("publisher.name", "Acme"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "'publisher' is not a relation on model 'item'"
    );
}

#[test]
fn error_unknown_root_model() {
    let schema = catalog_schema();
    let joins = JoinContext::new("order");
    let compiler = QueryCompiler::new(&schema, &joins);

    let err = compiler
        .compile(&SearchPredicate::term("total", "100"))
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown model 'order'");
}
