use std::sync::Arc;

use storage::{SessionStore, Storage};
use tracker_core::model::{
    Level, ProgressEntry, ProgressEntryId, SessionToken, SubTopic, Topic, TopicId, UserProfile,
};

use super::test_harness::{
    CannedGateway, RecordingGateway, ViewKind, setup_app_router, setup_view_harness,
};

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_user_and_notice() {
    let gateway = CannedGateway {
        profile: Some(UserProfile {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }),
        ..CannedGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Profile, gateway);

    harness.mount().await;
    let html = harness.render();
    assert!(html.contains("alice@example.com"), "missing email in {html}");
    assert!(html.contains("Profile loaded successfully!"), "missing notice in {html}");
    assert!(!html.contains("Loading profile..."));
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness(ViewKind::Profile, CannedGateway::default());

    harness.mount().await;
    let html = harness.render();
    assert!(
        html.contains("Failed to load profile. Please try again."),
        "missing error in {html}"
    );
    assert!(!html.contains("Username"));
}

#[tokio::test(flavor = "current_thread")]
async fn topics_view_smoke_renders_collapsed_cards() {
    let gateway = CannedGateway {
        topics: vec![Topic::new(
            TopicId::new("t1"),
            "Arrays",
            vec![
                SubTopic::new("Two Sum", Level::Easy).with_completed(true),
                SubTopic::new("3Sum", Level::Medium),
            ],
        )],
        ..CannedGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Topics, gateway);

    harness.mount().await;
    let html = harness.render();
    assert!(html.contains("Arrays"), "missing topic in {html}");
    assert!(html.contains("1/2"), "missing completion count in {html}");
    assert!(html.contains("View Subtopics"));
    // Collapsed by default.
    assert!(!html.contains("Two Sum"));
    assert!(!html.contains("Loading topics..."));
}

#[tokio::test(flavor = "current_thread")]
async fn topics_view_smoke_shows_placeholder_for_empty_list() {
    let mut harness = setup_view_harness(ViewKind::Topics, CannedGateway::default());

    harness.mount().await;
    let html = harness.render();
    assert!(html.contains("Loading topics..."), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_entries() {
    let gateway = CannedGateway {
        progress: vec![ProgressEntry::new(ProgressEntryId::new("p1"), "Graphs")],
        ..CannedGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Progress, gateway);

    harness.mount().await;
    let html = harness.render();
    assert!(html.contains("Graphs"), "missing entry in {html}");
    assert!(html.contains("Delete"));
    assert!(!html.contains("No topics completed yet."));
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Progress, CannedGateway::default());

    harness.mount().await;
    let html = harness.render();
    assert!(html.contains("No topics completed yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn signed_out_visit_to_topics_lands_on_login_without_calls() {
    let gateway = Arc::new(RecordingGateway::default());
    let storage = Storage::in_memory();
    let mut harness = setup_app_router("/start/topics", &storage, gateway.clone());

    harness.mount().await;
    let html = harness.render();
    assert_eq!(gateway.calls(), 0);
    assert!(html.contains("Access token"), "missing login form in {html}");
    assert!(html.contains("Sign in"));
    assert!(!html.contains("Loading topics..."));
    assert!(!html.contains("Logout"));
}

#[tokio::test(flavor = "current_thread")]
async fn signed_in_visit_to_topics_renders_behind_the_navbar() {
    let gateway = Arc::new(RecordingGateway::default());
    let storage = Storage::in_memory();
    storage.session.write(SessionToken::new("router-token").unwrap()).unwrap();
    let mut harness = setup_app_router("/start/topics", &storage, gateway.clone());

    harness.mount().await;
    let html = harness.render();
    assert!(html.contains("Logout"), "missing navbar in {html}");
    assert!(html.contains("Loading topics..."), "missing topics page in {html}");
    assert!(!html.contains("Access token"));
    assert!(gateway.calls() > 0);
}
