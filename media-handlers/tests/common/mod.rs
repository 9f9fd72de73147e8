//! Shared fakes for media-handlers integration tests.

#![allow(dead_code)]

pub mod fakes;
pub mod mock_bot;

use chrono::Utc;
use relay_core::{Chat, Message, User};

pub const TEST_CHAT_ID: i64 = 42;
pub const MIB: u64 = 1024 * 1024;

pub fn test_chat() -> Chat {
    Chat {
        id: TEST_CHAT_ID,
        chat_type: "Private".to_string(),
    }
}

pub fn text_message(content: &str) -> Message {
    Message {
        id: "7".to_string(),
        user: User {
            id: 1001,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat: test_chat(),
        content: content.to_string(),
        created_at: Utc::now(),
    }
}
