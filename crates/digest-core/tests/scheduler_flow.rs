mod common;

use digest_core::DeliveryMode;
use std::time::Duration;

#[tokio::test]
async fn window_expiry_sends_one_digest_for_the_player() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_millis(100));

    assert!(scheduler.observe_command("alice", "/tp alice spawn", false));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(scheduler.observe_command("alice", "/give alice diamond 64", false));

    let status = scheduler.status();
    assert_eq!(status.pending_players, 1);
    assert_eq!(status.pending_commands, 2);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let deliveries = sink.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].to, "ops@example.com");
    assert_eq!(deliveries[0].subject, "[Test Server] Command digest for alice");
    assert!(deliveries[0].html_body.contains("/tp alice spawn"));
    assert!(deliveries[0].html_body.contains("/give alice diamond 64"));

    let first = deliveries[0].html_body.find("/tp alice spawn").unwrap();
    let second = deliveries[0].html_body.find("/give alice diamond 64").unwrap();
    assert!(first < second);

    assert_eq!(scheduler.status().pending_players, 0);
}

#[tokio::test]
async fn window_is_anchored_to_the_first_command() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_millis(300));

    scheduler.observe_command("alice", "/kick bob", false);
    tokio::time::sleep(Duration::from_millis(150)).await;
    // A later command inside the window must not extend the schedule.
    scheduler.observe_command("alice", "/ban bob", false);
    tokio::time::sleep(Duration::from_millis(230)).await;

    // 380ms after the first command: the 300ms window elapsed even though
    // the second command arrived only 230ms ago.
    let deliveries = sink.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert!(deliveries[0].html_body.contains("/kick bob"));
    assert!(deliveries[0].html_body.contains("/ban bob"));
}

#[tokio::test]
async fn players_flush_independently() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_millis(100));

    scheduler.observe_command("alice", "/tp alice spawn", false);
    scheduler.observe_command("bob", "/weather clear", false);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let deliveries = sink.deliveries();
    assert_eq!(deliveries.len(), 2);
    let subjects: Vec<&str> = deliveries.iter().map(|m| m.subject.as_str()).collect();
    assert!(subjects.contains(&"[Test Server] Command digest for alice"));
    assert!(subjects.contains(&"[Test Server] Command digest for bob"));
}

#[tokio::test]
async fn manual_flush_cancels_timers() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_millis(150));

    scheduler.observe_command("alice", "/stop", false);
    scheduler.observe_command("bob", "/op eve", false);

    let flushed = scheduler.flush_all(DeliveryMode::Background).await;
    assert_eq!(flushed, 2);
    assert_eq!(scheduler.status().pending_players, 0);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sink.delivery_count(), 2);

    // Long past the original window: the cancelled timers stayed quiet.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(sink.delivery_count(), 2);

    assert_eq!(scheduler.flush_all(DeliveryMode::Background).await, 0);
}

#[tokio::test]
async fn delivery_failure_does_not_stop_other_players() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_secs(600));
    sink.set_failing(true);

    scheduler.observe_command("alice", "/gamemode creative alice", false);
    scheduler.observe_command("bob", "/difficulty peaceful", false);

    let flushed = scheduler.flush_all(DeliveryMode::Blocking).await;
    assert_eq!(flushed, 2);
    assert_eq!(sink.delivery_count(), 2);
    assert_eq!(scheduler.status().pending_players, 0);
}

#[tokio::test]
async fn shutdown_flushes_everything_and_closes_intake() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_secs(600));

    scheduler.observe_command("alice", "/whitelist off", false);
    scheduler.observe_command("bob", "/ban-ip 10.0.0.1", false);

    let flushed = scheduler.shutdown().await;
    assert_eq!(flushed, 2);
    // Blocking sends: both mails are recorded by the time shutdown returns.
    assert_eq!(sink.delivery_count(), 2);

    assert_eq!(scheduler.shutdown().await, 0);
    assert_eq!(sink.delivery_count(), 2);

    assert!(!scheduler.observe_command("alice", "/stop", false));
    assert_eq!(scheduler.status().pending_players, 0);
}

#[tokio::test]
async fn flushing_an_empty_buffer_is_a_no_op() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_millis(100));

    assert_eq!(scheduler.flush_all(DeliveryMode::Background).await, 0);
    assert_eq!(scheduler.shutdown().await, 0);
    assert_eq!(sink.delivery_count(), 0);
}
