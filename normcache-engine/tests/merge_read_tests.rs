use normcache_engine::PolicyEngine;
use normcache_policy::{pagination, FieldPolicy, FieldPolicyRegistry, PolicyError};
use normcache_types::FieldArguments;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn paginated_engine() -> PolicyEngine {
    let mut engine = PolicyEngine::default();
    engine.register("Query", "feed", pagination::offset_limit_policy());
    engine
}

fn page_args(offset: i64, limit: i64) -> FieldArguments {
    FieldArguments::new().with("offset", offset).with("limit", limit)
}

// ── merge without a policy ───────────────────────────────────────

#[test]
fn unregistered_field_replaces_outright() {
    let engine = PolicyEngine::default();
    let existing = json!([1, 2, 3]);
    let write = engine
        .merge_field("Query", "feed", &FieldArguments::new(), Some(&existing), json!([9]))
        .unwrap();
    assert_eq!(write.value, json!([9]));
}

#[test]
fn policy_without_merge_replaces_outright() {
    let mut engine = PolicyEngine::new(FieldPolicyRegistry::new());
    engine.register(
        "Query",
        "feed",
        FieldPolicy::new().with_read(pagination::full_list_read()),
    );
    let write = engine
        .merge_field("Query", "feed", &FieldArguments::new(), Some(&json!([1])), json!([2]))
        .unwrap();
    assert_eq!(write.value, json!([2]));
}

// ── merge function invocation ────────────────────────────────────

#[test]
fn first_write_passes_literal_absence() {
    let mut engine = PolicyEngine::default();
    engine.register(
        "Query",
        "feed",
        FieldPolicy::new()
            .with_merge_fn(|existing, incoming, _ctx| {
                // The engine must not synthesize a default for the first write.
                assert!(existing.is_none());
                Ok(incoming)
            })
            .with_read(pagination::full_list_read()),
    );

    let write = engine
        .merge_field("Query", "feed", &FieldArguments::new(), None, json!([1]))
        .unwrap();
    assert_eq!(write.value, json!([1]));
}

#[test]
fn merge_context_carries_key_filtered_arguments() {
    let mut engine = PolicyEngine::default();
    engine.register(
        "Query",
        "feed",
        FieldPolicy::new()
            .with_key_args(normcache_policy::KeyArgs::only(["type"]))
            .with_merge_fn(|_existing, incoming, ctx| {
                assert_eq!(ctx.type_name, "Query");
                assert_eq!(ctx.field_name, "feed");
                assert_eq!(ctx.args.len(), 3);
                assert_eq!(ctx.key_args.len(), 1);
                assert_eq!(ctx.key_args.get("type"), Some(&json!("TOP")));
                Ok(incoming)
            }),
    );

    let args = FieldArguments::new()
        .with("type", "TOP")
        .with("offset", 0)
        .with("limit", 2);
    engine
        .merge_field("Query", "feed", &args, None, json!([1, 2]))
        .unwrap();
}

#[test]
fn failed_merge_propagates_and_installs_nothing() {
    let mut engine = PolicyEngine::default();
    engine.register(
        "Query",
        "feed",
        FieldPolicy::new().with_merge_fn(|_, _, ctx| {
            Err(PolicyError::MergeRejected(format!("{}: refused", ctx.label())))
        }),
    );

    let mut map = normcache_engine::FieldMap::new();
    let args = FieldArguments::new();
    let key = engine.storage_key("Query", "feed", &args).unwrap();
    map.apply(normcache_engine::FieldWrite {
        storage_key: key.clone(),
        value: json!([1]),
    });

    let err = engine
        .merge_field("Query", "feed", &args, map.get(&key), json!([2]))
        .unwrap_err();
    assert!(matches!(err, PolicyError::MergeRejected(_)));
    // The failed write produced nothing to install; the old snapshot stands.
    assert_eq!(map.get(&key), Some(&json!([1])));
}

// ── offset/limit merge through the engine ────────────────────────

#[test]
fn pages_in_order_concatenate() {
    let engine = paginated_engine();

    let first = engine
        .merge_field("Query", "feed", &page_args(0, 2), None, json!([1, 2]))
        .unwrap();
    let second = engine
        .merge_field("Query", "feed", &page_args(2, 2), Some(&first.value), json!([3, 4]))
        .unwrap();

    assert_eq!(first.storage_key, second.storage_key);
    assert_eq!(second.value, json!([1, 2, 3, 4]));
}

#[test]
fn pages_out_of_order_converge() {
    let engine = paginated_engine();

    let late = engine
        .merge_field("Query", "feed", &page_args(2, 2), None, json!([3, 4]))
        .unwrap();
    assert_eq!(late.value, json!([null, null, 3, 4]));

    let early = engine
        .merge_field("Query", "feed", &page_args(0, 2), Some(&late.value), json!([1, 2]))
        .unwrap();
    assert_eq!(early.value, json!([1, 2, 3, 4]));
}

#[test]
fn replaying_a_page_is_idempotent() {
    let engine = paginated_engine();

    let once = engine
        .merge_field("Query", "feed", &page_args(0, 2), None, json!([1, 2]))
        .unwrap();
    let twice = engine
        .merge_field("Query", "feed", &page_args(0, 2), Some(&once.value), json!([1, 2]))
        .unwrap();
    assert_eq!(once.value, twice.value);
}

#[test]
fn overlapping_pages_last_write_wins() {
    let engine = paginated_engine();

    let base = engine
        .merge_field("Query", "feed", &page_args(0, 3), None, json!([1, 2, 3]))
        .unwrap();
    let overlap = engine
        .merge_field("Query", "feed", &page_args(1, 3), Some(&base.value), json!([20, 30, 40]))
        .unwrap();
    assert_eq!(overlap.value, json!([1, 20, 30, 40]));
}

// ── read dispatch ────────────────────────────────────────────────

#[test]
fn unregistered_field_reads_identity() {
    let engine = PolicyEngine::default();
    let stored = json!([1, 2]);
    assert_eq!(
        engine
            .read_field("Query", "feed", &FieldArguments::new(), Some(&stored))
            .unwrap(),
        Some(stored.clone())
    );
    assert_eq!(
        engine
            .read_field("Query", "feed", &FieldArguments::new(), None)
            .unwrap(),
        None
    );
}

#[test]
fn read_slices_the_stored_list() {
    let engine = paginated_engine();
    let stored = json!([1, 2, 3, 4]);

    assert_eq!(
        engine
            .read_field("Query", "feed", &page_args(1, 2), Some(&stored))
            .unwrap(),
        Some(json!([2, 3]))
    );
    assert_eq!(
        engine
            .read_field("Query", "feed", &FieldArguments::new(), Some(&stored))
            .unwrap(),
        Some(json!([1, 2, 3, 4]))
    );
}

#[test]
fn read_absent_is_a_miss_not_an_empty_hit() {
    let engine = paginated_engine();
    assert_eq!(
        engine
            .read_field("Query", "feed", &page_args(0, 5), None)
            .unwrap(),
        None
    );
}

#[test]
fn read_empty_list_is_a_hit_not_a_miss() {
    let engine = paginated_engine();
    assert_eq!(
        engine
            .read_field("Query", "feed", &page_args(0, 5), Some(&json!([])))
            .unwrap(),
        Some(json!([]))
    );
}

#[test]
fn failed_read_propagates() {
    let engine = paginated_engine();
    // A stored object where the policy expects a list.
    let err = engine
        .read_field("Query", "feed", &page_args(0, 5), Some(&json!({"bad": true})))
        .unwrap_err();
    assert!(matches!(err, PolicyError::InvalidValue(_)));
}

#[test]
fn read_does_not_mutate_the_snapshot() {
    let engine = paginated_engine();
    let stored = json!([1, 2, 3, 4]);
    let _ = engine
        .read_field("Query", "feed", &page_args(1, 2), Some(&stored))
        .unwrap();
    assert_eq!(stored, json!([1, 2, 3, 4]));
}

// ── value-shape agnosticism ──────────────────────────────────────

#[test]
fn non_list_values_flow_through_default_paths() {
    let engine = PolicyEngine::default();
    let write = engine
        .merge_field(
            "User",
            "profile",
            &FieldArguments::new(),
            None,
            json!({"name": "ada"}),
        )
        .unwrap();
    assert_eq!(write.value, json!({"name": "ada"}));
    assert_eq!(
        engine
            .read_field("User", "profile", &FieldArguments::new(), Some(&write.value))
            .unwrap(),
        Some(json!({"name": "ada"}))
    );
}

#[test]
fn scalar_replace_keeps_latest_value() {
    let engine = PolicyEngine::default();
    let first = engine
        .merge_field("User", "name", &FieldArguments::new(), None, Value::from("ada"))
        .unwrap();
    let second = engine
        .merge_field(
            "User",
            "name",
            &FieldArguments::new(),
            Some(&first.value),
            Value::from("grace"),
        )
        .unwrap();
    assert_eq!(second.value, json!("grace"));
}
