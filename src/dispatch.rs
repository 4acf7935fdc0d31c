use std::collections::HashSet;

use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::db::{DbClient, StorageError, Toggle};
use crate::telegram::client::TelegramClient;
use crate::telegram::types::{ForwardMessage, IncomingMessage};

/// A tagged message seen in a chat, identified by where it can be forwarded from.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundPost {
    pub text: String,
    pub chat_id: i64,
    pub message_id: i64,
}

/// Forward `message_id` from `from_chat_id` to `user_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryAction {
    pub user_id: i64,
    pub from_chat_id: i64,
    pub message_id: i64,
}

impl From<&IncomingMessage> for InboundPost {
    fn from(message: &IncomingMessage) -> Self {
        InboundPost {
            text: message.text_or_caption().to_string(),
            chat_id: message.chat.id,
            message_id: message.message_id,
        }
    }
}

impl From<&DeliveryAction> for ForwardMessage {
    fn from(action: &DeliveryAction) -> Self {
        ForwardMessage {
            chat_id: action.user_id,
            from_chat_id: action.from_chat_id,
            message_id: action.message_id,
        }
    }
}

static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").expect("valid hashtag pattern"));

/// Hashtags in order of first appearance, without repeats.
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = vec![];
    for found in HASHTAG.find_iter(text) {
        let tag = found.as_str();
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Resolves everyone subscribed to at least one tag of the post, each user once.
pub fn dispatch(db: &DbClient, post: &InboundPost) -> Result<Vec<DeliveryAction>, StorageError> {
    let mut notified: HashSet<i64> = HashSet::new();
    let mut actions: Vec<DeliveryAction> = vec![];

    for tag in extract_tags(&post.text) {
        for user_id in db.get_users_by_tag(&tag)? {
            if notified.insert(user_id) {
                actions.push(DeliveryAction {
                    user_id,
                    from_chat_id: post.chat_id,
                    message_id: post.message_id,
                });
            }
        }
    }

    Ok(actions)
}

/// Forwards the post to every recipient. A failed recipient is logged and skipped.
pub async fn deliver(telegram_client: &TelegramClient, actions: &[DeliveryAction]) -> usize {
    let mut delivered = 0;
    for action in actions {
        match telegram_client.forward_message(&action.into()).await {
            Ok(_) => delivered += 1,
            Err(err) if err.is_recipient_unreachable() => {
                info!("user {} is unreachable, skipping: {}", action.user_id, err)
            }
            Err(err) => warn!("failed to forward post to user {}: {}", action.user_id, err),
        }
    }
    info!("forwarded post to {} of {} users", delivered, actions.len());
    delivered
}

pub fn toggle_subscribe(db: &DbClient, user_id: i64, tag: &str) -> Result<Toggle, StorageError> {
    db.toggle_subscription(user_id, tag)
}

#[cfg(test)]
mod tests {
    use mockito::server_url;
    use serial_test::serial;

    use super::*;
    use crate::db::test_helpers::{setup_test_db, setup_test_db_with};
    use crate::telegram::test_helpers::{mock_forward_message_error, mock_forward_message_success};

    const TOKEN: &str = "token";

    fn post(text: &str) -> InboundPost {
        InboundPost {
            text: text.to_string(),
            chat_id: -100,
            message_id: 42,
        }
    }

    fn action(user_id: i64) -> DeliveryAction {
        DeliveryAction {
            user_id,
            from_chat_id: -100,
            message_id: 42,
        }
    }

    #[test]
    fn extracts_tags_in_order() {
        assert_eq!(
            extract_tags("#папян перенос, #лекция в 101. Ещё раз #папян!"),
            vec!["#папян", "#лекция"]
        );
        assert_eq!(
            extract_tags("#царёва1 и #болычев_совр"),
            vec!["#царёва1", "#болычев_совр"]
        );
        assert!(extract_tags("без тегов # вообще").is_empty());
        assert!(extract_tags("").is_empty());
    }

    #[test]
    #[serial]
    fn dispatch_deduplicates_users() {
        let db = setup_test_db();
        db.add_subscription(1, "#a").unwrap();
        db.add_subscription(1, "#b").unwrap();
        db.add_subscription(2, "#b").unwrap();
        db.add_subscription(3, "#c").unwrap();

        let actions = dispatch(&db, &post("#a #b")).unwrap();
        assert_eq!(actions, vec![action(1), action(2)]);
    }

    #[test]
    #[serial]
    fn dispatch_follows_tag_order() {
        let db = setup_test_db();
        db.add_subscription(1, "#a").unwrap();
        db.add_subscription(2, "#b").unwrap();

        let actions = dispatch(&db, &post("#b then #a")).unwrap();
        assert_eq!(actions, vec![action(2), action(1)]);
    }

    #[test]
    #[serial]
    fn dispatch_without_tags_or_subscribers() {
        let db = setup_test_db();
        db.add_subscription(1, "#a").unwrap();

        assert!(dispatch(&db, &post("no tags here")).unwrap().is_empty());
        assert!(dispatch(&db, &post("#z")).unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn dispatch_storage_error() {
        let db = setup_test_db_with(false);
        assert!(dispatch(&db, &post("#a")).is_err());
    }

    #[test]
    #[serial]
    fn toggle_twice() {
        let db = setup_test_db();

        assert_eq!(toggle_subscribe(&db, 1, "#a").unwrap(), Toggle::Subscribed);
        assert_eq!(toggle_subscribe(&db, 1, "#a").unwrap(), Toggle::Unsubscribed);
        assert!(db.get_user_tags(1).unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn deliver_continues_after_failure() {
        let url = &server_url();
        let actions = vec![action(1), action(2), action(3)];
        let _m1 = mock_forward_message_success(TOKEN, &(&actions[0]).into());
        let _m2 = mock_forward_message_error(TOKEN, &(&actions[1]).into());
        let _m3 = mock_forward_message_success(TOKEN, &(&actions[2]).into());
        let telegram_client = TelegramClient::new_with(String::from(TOKEN), String::from(url));

        let delivered = deliver(&telegram_client, &actions).await;
        assert_eq!(delivered, 2);
        _m1.assert();
        _m2.assert();
        _m3.assert();
    }

    #[test]
    fn post_from_caption() {
        let message = IncomingMessage {
            message_id: 7,
            from: None,
            chat: crate::telegram::types::Chat { id: -100 },
            text: None,
            caption: Some("#лекция".to_string()),
        };

        assert_eq!(
            InboundPost::from(&message),
            InboundPost {
                text: "#лекция".to_string(),
                chat_id: -100,
                message_id: 7,
            }
        );
    }
}
