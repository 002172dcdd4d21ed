use std::path::Path;

use teloxide::{
    prelude::*,
    types::{InputFile, ParseMode, Recipient},
};

use crate::monitor::NotificationIntent;

use super::{Delivery, PublishError, Publisher};

pub struct TelegramPublisher {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramPublisher {
    pub fn new(bot: Bot, recipient: Recipient) -> Self {
        Self { bot, recipient }
    }
}

impl Publisher for TelegramPublisher {
    async fn publish(&self, intent: &NotificationIntent) -> Result<Delivery, PublishError> {
        let Some(image) = load_image(&intent.image).await else {
            self.bot
                .send_message(self.recipient.clone(), intent.caption.clone())
                .parse_mode(ParseMode::Html)
                .await?;
            return Ok(Delivery::TextFallback);
        };

        let file_name = intent
            .image
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image.png".to_string());

        self.bot
            .send_photo(
                self.recipient.clone(),
                InputFile::memory(image).file_name(file_name),
            )
            .caption(intent.caption.clone())
            .parse_mode(ParseMode::Html)
            .await?;

        Ok(Delivery::Photo)
    }
}

/// Reads an image asset, or `None` when the caption should go out alone.
pub(super) async fn load_image(path: &Path) -> Option<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.is_empty() => {
            log::error!(
                "image_asset_empty path={} fallback=text",
                path.display()
            );
            None
        }
        Ok(bytes) => Some(bytes),
        Err(error) => {
            log::error!(
                "image_asset_unavailable path={} error={} fallback=text",
                path.display(),
                error
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use mockito::Matcher;
    use teloxide::{
        Bot,
        types::{ChatId, Recipient},
    };

    use super::{TelegramPublisher, load_image};
    use crate::monitor::{NotificationIntent, NotificationKind};
    use crate::notifier::{Delivery, PublishError, Publisher};

    const CHANNEL_MESSAGE: &str = r#"{"ok":true,"result":{"message_id":7,"date":1715666400,"chat":{"id":-1001234567890,"type":"channel","title":"Alerts"},"sender_chat":{"id":-1001234567890,"type":"channel","title":"Alerts"},"text":"alarm"}}"#;

    fn publisher(server: &mockito::Server) -> TelegramPublisher {
        let api_url = server.url().parse().expect("mock server url");
        TelegramPublisher::new(
            Bot::new("42:test-token").set_api_url(api_url),
            Recipient::Id(ChatId(-1001234567890)),
        )
    }

    fn intent(image: PathBuf) -> NotificationIntent {
        NotificationIntent {
            kind: NotificationKind::AlarmRaised,
            caption: "<b>Air raid alert</b>".to_string(),
            image,
        }
    }

    #[tokio::test]
    async fn missing_image_sends_caption_as_text() {
        let mut server = mockito::Server::new_async().await;
        let text = server
            .mock("POST", Matcher::Regex("(?i)/bot42:test-token/sendmessage$".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CHANNEL_MESSAGE)
            .expect(1)
            .create_async()
            .await;
        let photo = server
            .mock("POST", Matcher::Regex("(?i)/sendphoto$".to_string()))
            .expect(0)
            .create_async()
            .await;

        let temp = tempfile::tempdir().expect("temp dir");
        let delivery = publisher(&server)
            .publish(&intent(temp.path().join("absent.png")))
            .await
            .expect("text fallback should be delivered");

        assert_eq!(delivery, Delivery::TextFallback);
        text.assert_async().await;
        photo.assert_async().await;
    }

    #[tokio::test]
    async fn image_is_sent_as_photo() {
        let mut server = mockito::Server::new_async().await;
        let photo = server
            .mock("POST", Matcher::Regex("(?i)/sendphoto$".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CHANNEL_MESSAGE.replace(
                r#""text":"alarm""#,
                r#""photo":[{"file_id":"f","file_unique_id":"u","file_size":4,"width":1,"height":1}]"#,
            ))
            .expect(1)
            .create_async()
            .await;

        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("alarm.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).expect("write asset");

        let delivery = publisher(&server)
            .publish(&intent(path))
            .await
            .expect("photo should be delivered");

        assert_eq!(delivery, Delivery::Photo);
        photo.assert_async().await;
    }

    #[tokio::test]
    async fn forbidden_reply_maps_to_permission_denied() {
        let mut server = mockito::Server::new_async().await;
        let _photo = server
            .mock("POST", Matcher::Regex("(?i)/sendphoto$".to_string()))
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ok":false,"error_code":403,"description":"Forbidden: bot is not a member of the channel chat"}"#,
            )
            .create_async()
            .await;

        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("alarm.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).expect("write asset");

        let error = publisher(&server)
            .publish(&intent(path))
            .await
            .expect_err("forbidden reply should fail");

        assert!(
            matches!(error, PublishError::PermissionDenied { .. }),
            "error={error:?}"
        );
    }

    #[tokio::test]
    async fn other_api_errors_stay_plain_failures() {
        let mut server = mockito::Server::new_async().await;
        let _text = server
            .mock("POST", Matcher::Regex("(?i)/sendmessage$".to_string()))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ok":false,"error_code":400,"description":"Bad Request: can't parse entities: unsupported start tag"}"#,
            )
            .create_async()
            .await;

        let temp = tempfile::tempdir().expect("temp dir");
        let error = publisher(&server)
            .publish(&intent(temp.path().join("absent.png")))
            .await
            .expect_err("bad request should fail");

        assert!(
            matches!(error, PublishError::Request { .. }),
            "error={error:?}"
        );
    }

    #[tokio::test]
    async fn missing_or_empty_assets_fall_back_to_text() {
        let temp = tempfile::tempdir().expect("temp dir");
        assert!(load_image(&temp.path().join("absent.png")).await.is_none());

        let empty = temp.path().join("empty.png");
        fs::write(&empty, b"").expect("write empty asset");
        assert!(load_image(&empty).await.is_none());
    }

    #[tokio::test]
    async fn readable_assets_are_loaded() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("alarm.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).expect("write asset");

        assert_eq!(
            load_image(&path).await.expect("asset should load"),
            vec![0x89, b'P', b'N', b'G']
        );
    }
}
