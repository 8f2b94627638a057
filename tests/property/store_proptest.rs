//! Property-based tests for the message store
//!
//! Random operation sequences against the recording backend.

use chatroom::store::{StoreError, TIMELINE_LIMIT};
use proptest::prelude::*;

use crate::common::recording_store;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_blank_input_never_reaches_backend(
        user in "[ \t]{0,4}",
        text in "[a-z ]{0,10}",
    ) {
        runtime().block_on(async {
            let (recorder, store) = recording_store();
            store.connect().await.unwrap();
            let before = recorder.creates();

            let result = store.create_message("id1", &user, &text, None).await;
            prop_assert!(matches!(result, Err(StoreError::ValidationFailed(_))));
            prop_assert_eq!(recorder.creates(), before);
            Ok(())
        })?;
    }

    #[test]
    fn test_timeline_is_newest_first_and_bounded(count in 0usize..120) {
        runtime().block_on(async {
            let (_recorder, store) = recording_store();
            store.connect().await.unwrap();

            for n in 0..count {
                store
                    .create_message(format!("id{}", n), "alice", "hi", None)
                    .await
                    .unwrap();
            }

            let timeline = store.list_messages().await.unwrap();
            prop_assert_eq!(timeline.len(), count.min(TIMELINE_LIMIT as usize));
            for (position, record) in timeline.iter().enumerate() {
                prop_assert_eq!(record.id.as_str(), format!("id{}", count - 1 - position));
            }
            Ok(())
        })?;
    }

    #[test]
    fn test_replies_resolve_to_parent_author(parents in proptest::collection::vec("[a-z]{1,8}", 1..10)) {
        runtime().block_on(async {
            let (_recorder, store) = recording_store();
            store.connect().await.unwrap();

            for (n, author) in parents.iter().enumerate() {
                store
                    .create_message(format!("p{}", n), author, "root", None)
                    .await
                    .unwrap();
                store
                    .create_message(format!("r{}", n), "bob", "reply", Some(format!("p{}", n).as_str()))
                    .await
                    .unwrap();
            }

            let timeline = store.list_messages().await.unwrap();
            for record in timeline.iter().filter(|record| record.id.as_str().starts_with('r')) {
                let n: usize = record.id.as_str()[1..].parse().unwrap();
                prop_assert_eq!(record.parent_user(), Some(parents[n].as_str()));
            }
            Ok(())
        })?;
    }
}
