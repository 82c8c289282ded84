//! # Create / Recall Journey Tests
//!
//! The everyday path through the store: create memories, link them, look
//! them up by content, tag, context and association.

use mnemos_core::{AssociativeMemory, Context, ContextValue, DEFAULT_ASSOCIATION_STRENGTH};
use mnemos_e2e_tests::{BatchConfig, TestDataFactory, TestMemoryManager};

// ============================================================================
// CREATION
// ============================================================================

#[test]
fn test_create_is_idempotent_on_content() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();

    let first = memory.create_memory("Python", ["programming"], Context::new()).id;
    let second = memory.create_memory("Python", ["snakes"], Context::new()).id;

    assert_eq!(first, second);
    assert_eq!(memory.len(), 1);

    let entry = memory.get("Python").unwrap();
    assert_eq!(entry.access_count, 1);
    // The duplicate only reinforces; its tags are not merged
    assert!(entry.tags.contains("programming"));
    assert!(!entry.tags.contains("snakes"));
    assert!(memory.find_by_tags(&["snakes"], false).is_empty());
}

#[test]
fn test_association_creates_missing_endpoints() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();

    memory.associate("Rust", "Cargo", 0.7);

    assert_eq!(memory.len(), 2);
    assert_eq!(memory.get("Cargo").unwrap().access_count, 0);
    assert_eq!(memory.association("Rust", "Cargo").unwrap().strength, 0.7);
}

#[test]
fn test_repeated_association_strengthens_once_per_call() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    memory.associate("Rust", "Cargo", 0.5);
    memory.associate("Rust", "Cargo", 0.1);

    assert_eq!(memory.association_count(), 1);
    let assoc = memory.association("Rust", "Cargo").unwrap();
    assert!((assoc.strength - 0.7).abs() < 1e-9);

    // Both endpoints were reinforced by the second call
    assert_eq!(memory.get("Rust").unwrap().access_count, 1);
    assert_eq!(memory.get("Cargo").unwrap().access_count, 1);
}

#[test]
fn test_reverse_pair_is_a_separate_association() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    memory.associate("a", "b", 0.6);
    memory.associate("b", "a", 0.4);

    assert_eq!(memory.association_count(), 2);
    assert_eq!(memory.find_associations("a", 0.0).len(), 2);
}

#[test]
fn test_default_association_strength() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    let assoc = memory.create_association("x", "y", "related_to", DEFAULT_ASSOCIATION_STRENGTH, Context::new());

    assert_eq!(assoc.kind, "related_to");
    assert_eq!(assoc.strength, 0.5);
}

// ============================================================================
// RECALL
// ============================================================================

#[test]
fn test_recall_reinforces_monotonically() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    memory.remember("fact");

    let mut last_strength = memory.get("fact").unwrap().strength;
    for expected_count in 1..=10 {
        let entry = memory.recall("fact", true).unwrap();
        assert_eq!(entry.access_count, expected_count);
        assert!(entry.strength >= last_strength);
        assert!(entry.strength <= 1.0);
        last_strength = entry.strength;
    }
}

#[test]
fn test_recall_without_strengthening_is_read_only() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    memory.remember("fact");
    let before = memory.get("fact").unwrap().clone();

    let entry = memory.recall("fact", false).unwrap();

    assert_eq!(entry, &before);
}

#[test]
fn test_recall_unknown_content() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();

    assert!(memory.recall("nothing", true).is_none());
    assert!(memory.is_empty());
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_python_django_journey() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    let scenario = TestDataFactory::create_python_scenario(&mut memory);

    let links = memory.find_associations(scenario.content("language"), 0.3);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].strength, 0.8);

    let backend = memory.find_by_context("domain", "backend");
    assert_eq!(backend.len(), 2);

    let frameworks = memory.find_by_tags(&["framework"], false);
    assert_eq!(frameworks.len(), 1);
    assert_eq!(frameworks[0].content, "Django");

    let languages = memory.find_by_tags(&["programming"], false);
    let contents: Vec<&str> = languages.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["Python"]);
}

#[test]
fn test_find_associations_is_undirected_and_filtered() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    memory.associate("hub", "strong", 0.9);
    memory.associate("weak", "hub", 0.2);
    memory.associate("medium", "hub", 0.5);

    let found = memory.find_associations("hub", 0.3);
    let strengths: Vec<f64> = found.iter().map(|a| a.strength).collect();

    assert_eq!(strengths, [0.9, 0.5]);
    assert!(memory.find_associations("nowhere", 0.0).is_empty());
}

#[test]
fn test_tag_union_and_intersection() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    TestDataFactory::create_tagged_scenario(&mut memory);

    assert_eq!(memory.find_by_tags(&["rust", "python"], false).len(), 3);
    assert_eq!(memory.find_by_tags(&["programming", "rust"], true).len(), 2);
    assert!(memory.find_by_tags(&["rust", "cooking"], true).is_empty());
    assert!(memory.find_by_tags::<&str>(&[], false).is_empty());
}

#[test]
fn test_tag_results_sorted_by_strength() {
    let mut mgr = TestMemoryManager::new();
    TestDataFactory::create_tagged_scenario(&mut mgr.memory);
    assert!(mgr.set_strength("Rust ownership", 0.3));
    assert!(mgr.set_strength("Rust lifetimes", 0.9));
    assert!(mgr.set_strength("Python generators", 0.6));

    let found = mgr.memory.find_by_tags(&["programming"], false);
    let contents: Vec<&str> = found.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["Rust lifetimes", "Python generators", "Rust ownership"]);

    let rust = mgr.memory.find_by_tags(&["programming", "rust"], true);
    let contents: Vec<&str> = rust.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["Rust lifetimes", "Rust ownership"]);
}

#[test]
fn test_context_values_are_typed() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    TestDataFactory::create_batch_with_config(
        &mut memory,
        BatchConfig {
            count: 4,
            with_context: true,
            ..Default::default()
        },
    );
    TestDataFactory::create_memory_full(
        &mut memory,
        "stringly",
        &[],
        &[("batch_index", ContextValue::from("2"))],
    );

    let integers = memory.find_by_context("batch_index", 2i64);
    assert_eq!(integers.len(), 1);
    assert_eq!(integers[0].content, "Test memory 2");

    let texts = memory.find_by_context("batch_index", "2");
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].content, "stringly");
}

#[test]
fn test_stats_track_store() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    TestDataFactory::create_python_scenario(&mut memory);
    memory.remember("unlinked");

    let stats = memory.stats();
    assert_eq!(stats.total_memories, 3);
    assert_eq!(stats.total_associations, 1);
    assert_eq!(stats.accessed_memories, 2);
    assert_eq!(stats.distinct_tags, 4);
    assert!(stats.oldest_memory <= stats.newest_memory);
}

#[test]
fn test_forget_removes_memory_and_links() {
    let mut memory: AssociativeMemory = AssociativeMemory::new();
    TestDataFactory::create_chain_scenario(&mut memory);

    assert!(memory.forget("ML"));
    assert!(!memory.forget("ML"));

    assert_eq!(memory.len(), 2);
    assert_eq!(memory.association_count(), 0);
    assert!(memory.find_associations("AI", 0.0).is_empty());
    assert_eq!(memory.spread_activation("AI", 3).len(), 1);
}
