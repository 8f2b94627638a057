//! Message store integration tests
//!
//! Creation, reply linkage and the timeline read against SQLite.

use assert_matches::assert_matches;
use chatroom::shared::SharedError;
use chatroom::store::{StoreError, TIMELINE_LIMIT};

use crate::common::TestDatabase;

#[tokio::test]
async fn test_created_message_appears_first() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    let id = assert_ok!(store.create_message("id1", "alice", "hi", None).await);
    assert_eq!(id.as_str(), "id1");

    let timeline = assert_ok!(store.list_messages().await);
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].id.as_str(), "id1");
    assert_eq!(timeline[0].user, "alice");
    assert_eq!(timeline[0].text, "hi");
    assert!(timeline[0].parent.is_none());
}

#[tokio::test]
async fn test_reply_carries_parent_preview() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    assert_ok!(store.create_message("id1", "alice", "hi", None).await);
    assert_ok!(store.create_message("id2", "bob", "hello", Some("id1")).await);

    let timeline = assert_ok!(store.list_messages().await);
    assert_timeline_ids!(timeline, ["id2", "id1"]);
    assert_eq!(timeline[0].parent_user(), Some("alice"));
    assert_eq!(timeline[0].parent_text(), Some("hi"));
    assert!(!timeline[1].is_reply());
}

#[tokio::test]
async fn test_replies_to_same_parent_share_preview() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    assert_ok!(store.create_message("root", "alice", "pizza?", None).await);
    assert_ok!(store.create_message("r1", "bob", "yes", Some("root")).await);
    assert_ok!(store.create_message("r2", "carol", "no", Some("root")).await);
    assert_ok!(store.create_message("r3", "dave", "why", Some("r1")).await);

    let timeline = assert_ok!(store.list_messages().await);
    assert_timeline_ids!(timeline, ["r3", "r2", "r1", "root"]);
    assert_eq!(timeline[0].parent_user(), Some("bob"));
    assert_eq!(timeline[1].parent_text(), Some("pizza?"));
    assert_eq!(timeline[2].parent_text(), Some("pizza?"));
}

#[tokio::test]
async fn test_missing_reply_target_writes_nothing() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    let result = store.create_message("id3", "carol", "yo", Some("nope")).await;
    assert_matches!(result, Err(StoreError::ReplyTargetMissing(ref target)) if target == "nope");

    let timeline = assert_ok!(store.list_messages().await);
    assert!(timeline.is_empty());
}

#[tokio::test]
async fn test_blank_reply_target_is_plain_message() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    assert_ok!(store.create_message("id1", "alice", "hi", Some("   ")).await);

    let timeline = assert_ok!(store.list_messages().await);
    assert!(!timeline[0].is_reply());
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    assert_ok!(store.create_message("id1", "alice", "hi", None).await);
    let result = store.create_message("id1", "bob", "again", None).await;
    assert_matches!(result, Err(StoreError::DuplicateId(ref id)) if id == "id1");

    let timeline = assert_ok!(store.list_messages().await);
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].user, "alice");
}

#[tokio::test]
async fn test_timeline_is_newest_first() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    for n in 0..5 {
        assert_ok!(
            store
                .create_message(format!("id{}", n), "alice", &format!("message {}", n), None)
                .await
        );
    }

    let timeline = assert_ok!(store.list_messages().await);
    assert_timeline_ids!(timeline, ["id4", "id3", "id2", "id1", "id0"]);
}

#[tokio::test]
async fn test_timeline_is_bounded() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    for n in 0..60 {
        assert_ok!(
            store
                .create_message(format!("id{:02}", n), "alice", "spam", None)
                .await
        );
    }

    let timeline = assert_ok!(store.list_messages().await);
    assert_eq!(timeline.len() as i64, TIMELINE_LIMIT);
    assert_eq!(timeline[0].id.as_str(), "id59");
    assert_eq!(timeline[49].id.as_str(), "id10");
}

#[tokio::test]
async fn test_reply_to_message_outside_window_keeps_preview() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    assert_ok!(store.create_message("old", "alice", "first!", None).await);
    for n in 0..TIMELINE_LIMIT {
        assert_ok!(
            store
                .create_message(format!("filler{}", n), "bob", "noise", None)
                .await
        );
    }
    assert_ok!(store.create_message("late", "carol", "replying late", Some("old")).await);

    let timeline = assert_ok!(store.list_messages().await);
    assert_eq!(timeline[0].id.as_str(), "late");
    assert_eq!(timeline[0].parent_text(), Some("first!"));
    assert!(timeline.iter().all(|record| record.id.as_str() != "old"));
}

#[tokio::test]
async fn test_validation_reports_field() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    let result = store.create_message("id1", "alice", "  ", None).await;
    assert_matches!(
        result,
        Err(StoreError::ValidationFailed(SharedError::ValidationError { ref field, .. })) if field == "text"
    );

    let result = store.create_message("", "alice", "hi", None).await;
    assert_matches!(
        result,
        Err(StoreError::ValidationFailed(SharedError::ValidationError { ref field, .. })) if field == "id"
    );

    let timeline = assert_ok!(store.list_messages().await);
    assert!(timeline.is_empty());
}

#[tokio::test]
async fn test_messages_survive_reconnect() {
    let db = TestDatabase::connected().await;
    let store = db.store();

    assert_ok!(store.create_message("id1", "alice", "hi", None).await);
    store.reconnect().await;
    assert!(store.is_connected().await);

    let timeline = assert_ok!(store.list_messages().await);
    assert_timeline_ids!(timeline, ["id1"]);
}

#[tokio::test]
async fn test_independent_store_sees_same_graph() {
    let db = TestDatabase::connected().await;
    assert_ok!(db.store().create_message("id1", "alice", "hi", None).await);
    db.store().shutdown().await;

    let other = db.reopen();
    assert_ok!(other.connect().await);
    assert_ok!(other.create_message("id2", "bob", "hey", Some("id1")).await);

    let timeline = assert_ok!(other.list_messages().await);
    assert_timeline_ids!(timeline, ["id2", "id1"]);
    assert_eq!(timeline[0].parent_user(), Some("alice"));
}
