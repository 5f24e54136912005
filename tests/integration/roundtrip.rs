use crate::*;

/// Full protocol round trip: miss → pending → background compute → hit.
/// 25! exceeds u64 range, so this also proves no truncation end to end.
#[tokio::test]
async fn test_round_trip_large_factorial() {
    let daemon = spawn_daemon().await.unwrap();

    let (code, body) = api_get(&daemon, "/factorial?number=25").await.unwrap();
    assert_eq!(code, 200);
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Result for 25 could not be found. It will be calculated as soon as possible!"
    );

    let message = wait_for_hit(&daemon, 25, Duration::from_secs(10)).await.unwrap();
    assert_eq!(message, "The result for 25 is 15511210043330985984000000!");

    // The stored record is the bare decimal, bit-exact.
    let record = daemon.store.get(25).unwrap().unwrap();
    assert_eq!(record.result, "15511210043330985984000000");
}

/// Redelivering the same key leaves an identical record. Duplicate work
/// is tolerated by design; duplicate writes must be invisible.
#[tokio::test]
async fn test_duplicate_work_is_idempotent() {
    let daemon = spawn_daemon().await.unwrap();

    // Two rapid lookups for the same missing key can both enqueue — this
    // is the accepted race on first computation.
    let (code_a, _) = api_get(&daemon, "/factorial?number=30").await.unwrap();
    let (code_b, _) = api_get(&daemon, "/factorial?number=30").await.unwrap();
    assert_eq!(code_a, 200);
    assert_eq!(code_b, 200);

    wait_for_hit(&daemon, 30, Duration::from_secs(10)).await.unwrap();

    // However many items were processed, exactly one record exists.
    assert_eq!(daemon.store.count(), 1);
    let first = daemon.store.get(30).unwrap().unwrap();

    // Give any in-flight duplicate time to overwrite, then re-read.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let second = daemon.store.get(30).unwrap().unwrap();
    assert_eq!(first, second);
}

/// Several distinct keys all complete and all serve hits afterwards.
#[tokio::test]
async fn test_many_keys_complete() {
    let daemon = spawn_daemon().await.unwrap();

    for n in [1u64, 2, 5, 10, 20] {
        let (code, _) = api_get(&daemon, &format!("/factorial?number={}", n))
            .await
            .unwrap();
        assert_eq!(code, 200);
    }

    for (n, expected) in [
        (1u64, "1"),
        (2, "2"),
        (5, "120"),
        (10, "3628800"),
        (20, "2432902008176640000"),
    ] {
        let message = wait_for_hit(&daemon, n, Duration::from_secs(10)).await.unwrap();
        assert_eq!(message, format!("The result for {} is {}!", n, expected));
    }
}
