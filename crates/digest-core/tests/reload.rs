mod common;

use digest_core::{CommandFilter, DigestSettings};
use std::time::Duration;

#[tokio::test]
async fn reload_keeps_existing_entries_on_their_original_schedule() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_millis(300));

    scheduler.observe_command("alice", "/tp alice spawn", false);

    // Shrink the window. Alice's entry keeps its 300ms schedule.
    scheduler.reload(common::open_settings(Duration::from_millis(50)));

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(sink.delivery_count(), 0);
    assert_eq!(scheduler.status().pending_players, 1);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(sink.delivery_count(), 1);
}

#[tokio::test]
async fn reload_applies_to_entries_opened_afterwards() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_secs(600));

    scheduler.reload(common::open_settings(Duration::from_millis(80)));
    scheduler.observe_command("bob", "/kill bob", false);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(sink.delivery_count(), 1);
}

#[tokio::test]
async fn digests_render_with_the_templates_current_at_flush_time() {
    let (scheduler, sink) = common::recording_scheduler(Duration::from_millis(120));

    scheduler.observe_command("alice", "/seed", false);

    let updated = DigestSettings::new(
        "Renamed Server",
        "New subject for %playerName% on %serverName%",
        "New body for %playerName%:",
        "audit@example.com",
        Duration::from_millis(120),
        CommandFilter::new(&[], &[], false),
    );
    scheduler.reload(updated);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let deliveries = sink.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].subject, "New subject for alice on Renamed Server");
    assert_eq!(deliveries[0].to, "audit@example.com");
    assert!(deliveries[0].html_body.starts_with("New body for alice:"));
    assert!(deliveries[0].html_body.contains("/seed"));
}

#[tokio::test]
async fn status_reports_the_server_name_in_effect() {
    let (scheduler, _sink) = common::recording_scheduler(Duration::from_secs(600));
    assert_eq!(scheduler.status().server_name, "Test Server");

    let renamed = DigestSettings::new(
        "Renamed Server",
        "[%serverName%] Command digest for %playerName%",
        "Commands executed by %playerName% on %serverName%:",
        "ops@example.com",
        Duration::from_secs(600),
        CommandFilter::new(&[], &[], false),
    );
    scheduler.reload(renamed);

    assert_eq!(scheduler.status().server_name, "Renamed Server");
}

#[tokio::test]
async fn reload_changes_admission_for_new_events() {
    let (scheduler, _sink) = common::recording_scheduler(Duration::from_secs(600));

    assert!(scheduler.observe_command("alice", "/tp alice spawn", false));

    let skip_teleports = DigestSettings::new(
        "Test Server",
        "[%serverName%] Command digest for %playerName%",
        "Commands executed by %playerName% on %serverName%:",
        "ops@example.com",
        Duration::from_secs(600),
        CommandFilter::new(&["tp".to_string()], &[], false),
    );
    scheduler.reload(skip_teleports);

    assert!(!scheduler.observe_command("bob", "/tp bob spawn", false));
    assert!(scheduler.observe_command("bob", "/kick carol", false));
}
