//! Property-based tests for message validation
//!
//! Uses proptest to generate random inputs and verify properties

use chatroom::shared::{MessageRecord, NewMessage};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_blank_user_is_always_rejected(
        user in "[ \t\n]*",
        text in "[a-z]{1,20}",
    ) {
        let message = NewMessage::new("id1", user, text, None);
        let err = message.validate().unwrap_err();
        prop_assert_eq!(err.field(), "user");
    }

    #[test]
    fn test_blank_text_is_always_rejected(
        user in "[a-z]{1,12}",
        text in "[ \t\n]*",
    ) {
        let message = NewMessage::new("id1", user, text, None);
        let err = message.validate().unwrap_err();
        prop_assert_eq!(err.field(), "text");
    }

    #[test]
    fn test_non_blank_fields_are_accepted(
        user in "[a-zA-Z0-9]{1,12}",
        text in "\\PC{0,40}[a-z]\\PC{0,40}",
    ) {
        let message = NewMessage::new("id1", user, text, None);
        prop_assert!(message.validate().is_ok());
    }

    #[test]
    fn test_blank_reply_target_means_no_reply(reply_to in "[ \t]*") {
        let message = NewMessage::new("id1", "alice", "hi", Some(reply_to.as_str()));
        prop_assert!(message.reply_to.is_none());
    }

    #[test]
    fn test_half_populated_parent_is_dropped(
        parent_user in proptest::option::of("[a-z]{1,8}"),
        parent_text in proptest::option::of("[a-z]{1,8}"),
    ) {
        let both = parent_user.is_some() && parent_text.is_some();
        let record = MessageRecord::from_row(
            "id1".to_string(),
            "alice".to_string(),
            "hi".to_string(),
            parent_user,
            parent_text,
        );
        prop_assert_eq!(record.is_reply(), both);
    }
}
