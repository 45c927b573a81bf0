// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Basic parade-query usage example.
//!
//! Demonstrates:
//! 1. Registering models and relations
//! 2. Compiling each predicate kind to its SQL fragment
//! 3. Resolving predicates across a join
//! 4. Score and highlight annotations
//!
//! # Run
//!
//! ```bash
//! cargo run --example basic_usage
//! ```

use serde_json::json;

use parade_query::{
    Highlight, JoinContext, ModelSchema, QueryCompiler, QueryDocument, SchemaRegistry, Score,
    SearchPredicate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Simple logging (no filter for simplicity)
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::TRACE)
        .compact()
        .init();

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║           parade-query: Basic Usage Example                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Register models
    // ─────────────────────────────────────────────────────────────────────────
    println!("📦 Registering models...");

    let mut schema = SchemaRegistry::new();
    schema.register(
        ModelSchema::new("item", "catalog_item")
            .column("name")
            .column("description")
            .column("rating"),
    );
    schema.register(
        ModelSchema::new("review", "catalog_review")
            .column("review")
            .relation("item", "item"),
    );
    println!("   └─ item (catalog_item), review (catalog_review) ──item──→ item");

    // ─────────────────────────────────────────────────────────────────────────
    // 2. Compile each predicate kind on the item model
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🔍 Compiling predicates on item...");

    let joins = JoinContext::new("item");
    let compiler = QueryCompiler::new(&schema, &joins);

    let predicates = vec![
        SearchPredicate::term("description", "running shoes"),
        SearchPredicate::phrase("description", "plastic keyboard"),
        SearchPredicate::phrase_prefix("description", "plastic keyb"),
        SearchPredicate::fuzzy_term("description", "ruining shoez"),
        SearchPredicate::fuzzy_phrase("description", "plastik keybord"),
        SearchPredicate::json(
            "description",
            QueryDocument::from(json!({
                "boolean": {
                    "should": [
                        {"term": {"field": "description", "value": "keyboard"}},
                        {"term": {"field": "description", "value": "shoes"}},
                    ]
                }
            })),
        ),
    ];

    for predicate in &predicates {
        let expr = compiler.compile(predicate)?;
        println!("   └─ {:14} → {}", predicate.kind_name(), expr.sql);
        if !expr.params.is_empty() {
            println!("      {:14}   params: {:?}", "", expr.params);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 3. Compile across a join
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🔗 Compiling review predicates reaching into item...");

    let joins = JoinContext::new("review").alias("item", "T2");
    let compiler = QueryCompiler::new(&schema, &joins);

    let joined = compiler.compile(&SearchPredicate::phrase(
        "item.description",
        "plastic keyboard",
    ))?;
    println!("   └─ phrase      → {}", joined.sql);

    let joined_fuzzy =
        compiler.compile(&SearchPredicate::fuzzy_term("item.description", "keybord"))?;
    println!("   └─ fuzzy_term  → {}", joined_fuzzy.sql);
    println!("      params: {:?}", joined_fuzzy.params);

    // ─────────────────────────────────────────────────────────────────────────
    // 4. Annotations
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🏷️  Annotations...");

    let score = Score::field("item.description").to_sql(&schema, &joins)?;
    println!("   └─ score       → {}", score.sql);

    let highlight = Highlight::new("review")
        .tags("<mark>", "</mark>")
        .to_sql(&schema, &joins)?;
    println!("   └─ highlight   → {}", highlight.sql);
    println!("      params: {:?}", highlight.params);

    println!("\n💡 Splice the fragments into your statement, e.g.:");
    println!("   SELECT *, {} AS score", score.sql);
    println!("   FROM catalog_review");
    println!("   JOIN catalog_item T2 ON T2.id = catalog_review.item_id");
    println!("   WHERE {}", joined.sql);
    println!("   ORDER BY score DESC;");

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║                    Example complete!                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    Ok(())
}
