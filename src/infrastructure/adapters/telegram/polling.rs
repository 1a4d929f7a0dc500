//! Long polling loop - one spawned task per update

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::TelegramAdapter;
use crate::application::services::MessageService;

/// Pause after a failed getUpdates call
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Poll Telegram until `shutdown` resolves
///
/// Each update is handled in its own task, so a slow vendor call in one chat
/// never holds up the others. Tasks still running at shutdown are abandoned.
pub async fn run(
    service: Arc<MessageService<TelegramAdapter>>,
    poll_timeout: u64,
    shutdown: impl Future<Output = ()>,
) {
    tokio::pin!(shutdown);
    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        let result = tokio::select! {
            _ = &mut shutdown => break,
            result = service.bot().get_updates(offset, poll_timeout) => result,
        };

        match result {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::debug!(count = updates.len(), "Received updates");
                }
                offset = TelegramAdapter::get_next_offset(&updates, offset);

                for update in updates {
                    let Some(message) = TelegramAdapter::inbound_message(&update, service.parser()) else {
                        continue;
                    };

                    let service = Arc::clone(&service);
                    let update_id = update.update_id;
                    tokio::spawn(async move {
                        let chat_id = message.chat_id.clone();
                        let preview = message.content.preview();
                        if let Err(e) = service.process(message).await {
                            tracing::error!(update_id, chat_id = %chat_id, preview = %preview, error = %e, "Failed to handle update");
                        }
                    });
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to get updates");
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(ERROR_BACKOFF) => {}
                }
            }
        }
    }

    tracing::info!("Message loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::messaging::{CommandDispatcher, MessageParser};
    use crate::infrastructure::config::Config;
    use crate::infrastructure::vendors::VendorClient;

    #[tokio::test]
    async fn unreachable_api_still_honours_shutdown() {
        let config = Arc::new(Config::default().with_secrets(Some("t".into()), |_| None).unwrap());
        let vendors = VendorClient::new(config.clone()).unwrap();
        let bot = TelegramAdapter::new("t", "http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let service = Arc::new(MessageService::new(
            bot,
            MessageParser::default(),
            CommandDispatcher::new(config, vendors),
        ));

        let stopped = tokio::time::timeout(
            Duration::from_secs(3),
            run(service, 0, tokio::time::sleep(Duration::from_millis(200))),
        )
        .await;
        assert!(stopped.is_ok());
    }
}
