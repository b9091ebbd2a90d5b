//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the TTL store against its read/write contract.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlStore;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9:_-]{1,32}".prop_map(|s| s)
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Clear),
    ]
}

/// Paused-clock runtime so TTL properties never sleep for real.
fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the store agrees with a plain HashMap
    // model as long as no TTL elapses.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let rt = paused_runtime();
        rt.block_on(async {
            let store = TtlStore::new(TEST_TTL);
            let mut model: HashMap<String, String> = HashMap::new();

            for op in ops {
                match op {
                    CacheOp::Set { key, value } => {
                        store.set(key.clone(), value.clone());
                        model.insert(key, value);
                    }
                    CacheOp::Get { key } => {
                        prop_assert_eq!(store.get(&key), model.get(&key).cloned());
                    }
                    CacheOp::Delete { key } => {
                        store.delete(&key);
                        model.remove(&key);
                    }
                    CacheOp::Clear => {
                        store.clear();
                        model.clear();
                    }
                }
            }

            prop_assert_eq!(store.len(), model.len());
            Ok(())
        })?;
    }

    // Immediately after set(k, v), get(k) returns v; once the TTL has
    // elapsed it returns nothing.
    #[test]
    fn prop_visible_until_ttl_elapses(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in 1u64..10_000
    ) {
        let rt = paused_runtime();
        rt.block_on(async {
            let ttl = Duration::from_millis(ttl_ms);
            let store = TtlStore::new(ttl);

            store.set(key.clone(), value.clone());
            prop_assert_eq!(store.get(&key), Some(value));

            tokio::time::advance(ttl).await;
            prop_assert_eq!(store.get(&key), None);
            Ok(())
        })?;
    }

    // Keys that were never set are absent.
    #[test]
    fn prop_unset_keys_are_absent(
        set_keys in prop::collection::hash_set(key_strategy(), 0..20),
        absent_key in key_strategy()
    ) {
        prop_assume!(!set_keys.contains(&absent_key));
        let rt = paused_runtime();
        rt.block_on(async {
            let store = TtlStore::new(TEST_TTL);
            for key in set_keys {
                store.set(key, "v".to_string());
            }
            prop_assert_eq!(store.get(&absent_key), None);
            Ok(())
        })?;
    }
}

// Concurrent tasks on one shared store never corrupt it
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_concurrent_operation_correctness(
        operations in prop::collection::vec(cache_op_strategy(), 10..80)
    ) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async {
            let store = Arc::new(TtlStore::new(TEST_TTL));
            let written: Arc<Vec<String>> = Arc::new(
                operations
                    .iter()
                    .filter_map(|op| match op {
                        CacheOp::Set { value, .. } => Some(value.clone()),
                        _ => None,
                    })
                    .collect(),
            );

            let mut handles = vec![];
            for op in operations {
                let store = Arc::clone(&store);
                let written = Arc::clone(&written);

                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Set { key, value } => store.set(key, value),
                        CacheOp::Get { key } => {
                            if let Some(value) = store.get(&key) {
                                // Every value read must be one some task wrote in full
                                if !written.contains(&value) {
                                    return Err(format!("unexpected value {:?}", value));
                                }
                            }
                        }
                        CacheOp::Delete { key } => store.delete(&key),
                        CacheOp::Clear => store.clear(),
                    }
                    Ok::<_, String>(())
                }));
            }

            for handle in handles {
                let result = handle.await.expect("Task should not panic");
                prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
            }

            store.stop().await.expect("first stop succeeds");
            Ok(())
        })?;
    }
}
