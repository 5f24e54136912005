use crate::*;

/// Missing parameter is a 400 with the exact client-facing message.
#[tokio::test]
async fn test_missing_parameter_is_400() {
    let daemon = spawn_daemon().await.unwrap();

    let (code, body) = api_get(&daemon, "/factorial").await.unwrap();
    assert_eq!(code, 400);
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Parameter 'number' is missing from request!"
    );
    assert_eq!(daemon.enqueued_count(), 0, "rejection must not enqueue");
}

/// Non-integer parameter is a 400.
#[tokio::test]
async fn test_non_integer_parameter_is_400() {
    let daemon = spawn_daemon().await.unwrap();

    let (code, body) = api_get(&daemon, "/factorial?number=abc").await.unwrap();
    assert_eq!(code, 400);
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Parameter 'number' is missing from request!"
    );
    assert_eq!(daemon.enqueued_count(), 0);
}

/// Negative input is a 400 with the historical wording.
#[tokio::test]
async fn test_negative_number_is_400() {
    let daemon = spawn_daemon().await.unwrap();

    let (code, body) = api_get(&daemon, "/factorial?number=-1").await.unwrap();
    assert_eq!(code, 400);
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Given number is smaller than 1!"
    );
    assert_eq!(daemon.enqueued_count(), 0);
}

/// Zero is in domain: it takes the normal 200 path (pending, then 1).
#[tokio::test]
async fn test_zero_takes_success_path() {
    let daemon = spawn_daemon().await.unwrap();

    let (code, body) = api_get(&daemon, "/factorial?number=0").await.unwrap();
    assert_eq!(code, 200);
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Result for 0 could not be found. It will be calculated as soon as possible!"
    );

    let message = wait_for_hit(&daemon, 0, Duration::from_secs(5)).await.unwrap();
    assert_eq!(message, "The result for 0 is 1!");
}

/// A cache miss enqueues exactly one work item.
#[tokio::test]
async fn test_miss_enqueues_exactly_one_item() {
    let daemon = spawn_daemon().await.unwrap();

    let (code, body) = api_get(&daemon, "/factorial?number=11").await.unwrap();
    assert_eq!(code, 200);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Result for 11 could not be found"));
    assert_eq!(daemon.enqueued_count(), 1);
}

/// Once a record exists, lookups never enqueue again.
#[tokio::test]
async fn test_hit_short_circuits_the_queue() {
    let daemon = spawn_daemon().await.unwrap();

    // Seed the store directly — no queue involved.
    daemon
        .store
        .put(&facto_core::ResultRecord::new(6, "720"))
        .unwrap();

    for _ in 0..3 {
        let (code, body) = api_get(&daemon, "/factorial?number=6").await.unwrap();
        assert_eq!(code, 200);
        assert_eq!(body["message"].as_str().unwrap(), "The result for 6 is 720!");
    }
    assert_eq!(daemon.enqueued_count(), 0, "hits must be pure reads");
}
