//! End-to-end harness runs against the in-process store.

use kvload::{LoadRunner, MemoryStore, WorkloadConfig};

#[tokio::test]
async fn write_then_read_through_memory_store() {
    let store = MemoryStore::new();
    let config = WorkloadConfig {
        ops_per_worker: 50,
        key_space: 10,
        value_size: 32,
        seed: Some(42),
    };
    let runner = LoadRunner::new(store.clone(), config);

    runner.smoke_test().await.unwrap();

    let write = runner.run_write(4).await.unwrap();
    assert_eq!(write.completed, 200);
    assert_eq!(write.bytes, 200 * 32);
    assert!(write.duration_secs > 0.0);
    assert!(write.ops_per_sec() > 0.0);

    // At most the key space plus the smoke-test key can exist afterwards.
    assert!(store.len() <= 11);

    let read = runner.run_read(4).await.unwrap();
    assert_eq!(read.completed, 200);
    assert!(read.bytes <= 200 * 32);
    assert!(read.duration_secs > 0.0);
}

#[tokio::test]
async fn sequential_concurrency_levels_are_independent() {
    let store = MemoryStore::new();
    let config = WorkloadConfig {
        ops_per_worker: 20,
        key_space: 5,
        value_size: 16,
        seed: Some(1),
    };
    let runner = LoadRunner::new(store, config);

    for concurrency in [1, 2, 4] {
        let result = runner.run_write(concurrency).await.unwrap();
        assert_eq!(result.completed, 20 * concurrency);
        assert_eq!(result.concurrency, concurrency);
    }
}
