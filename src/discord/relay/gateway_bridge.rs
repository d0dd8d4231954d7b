// Bridges serenity and the relay queues.
//
// Inbound: gateway `Message` -> `InboundMessage`.
// Outbound: `OutboundMessage` -> HTTP send, split to fit Discord's limit.

use crate::core::relay::{InboundMessage, OutboundMessage};
use crate::discord::Error;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Discord rejects message content longer than this many characters.
const MAX_MESSAGE_CHARS: usize = 2000;

pub fn to_inbound(message: &serenity::Message) -> InboundMessage {
    InboundMessage {
        author_is_bot: message.author.bot,
        guild_id: message.guild_id.map(|id| id.get()),
        channel_id: message.channel_id.get(),
        content: message.content.clone(),
    }
}

/// Split text into pieces Discord will accept, in order.
pub fn split_for_discord(text: &str) -> Vec<String> {
    text.chars()
        .collect::<Vec<char>>()
        .chunks(MAX_MESSAGE_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Something that can post plain text into a channel.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_text(&self, channel_id: u64, text: String) -> Result<(), Error>;
}

#[async_trait]
impl ReplySink for serenity::Http {
    async fn send_text(&self, channel_id: u64, text: String) -> Result<(), Error> {
        serenity::ChannelId::new(channel_id).say(self, text).await?;
        Ok(())
    }
}

/// Deliver replies until the relay drops its sender.
///
/// Each reply is sent on its own task so a rate-limited channel only delays
/// its own replies. Chunks of one reply still go out in order.
pub async fn run_outbound<S>(sink: Arc<S>, mut outbound: mpsc::Receiver<OutboundMessage>)
where
    S: ReplySink + 'static,
{
    while let Some(reply) = outbound.recv().await {
        let sink = Arc::clone(&sink);

        tokio::spawn(async move {
            for chunk in split_for_discord(&reply.content) {
                if let Err(e) = sink.send_text(reply.channel_id, chunk).await {
                    tracing::error!(channel_id = reply.channel_id, "Failed to send AI reply: {}", e);
                    break;
                }
            }
        });
    }

    tracing::info!("Outbound queue closed, dispatcher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_short_reply_is_one_message() {
        assert_eq!(split_for_discord("Hello there"), vec!["Hello there"]);
    }

    #[test]
    fn test_long_reply_is_split_at_limit() {
        let text = "a".repeat(MAX_MESSAGE_CHARS * 2 + 5);

        let parts = split_for_discord(&text);

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].chars().count(), MAX_MESSAGE_CHARS);
        assert_eq!(parts[1].chars().count(), MAX_MESSAGE_CHARS);
        assert_eq!(parts[2], "aaaaa");
        assert_eq!(parts.concat(), text);
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        // Multi-byte characters must not be cut in half.
        let text = "こんにちは".repeat(500);

        let parts = split_for_discord(&text);

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chars().count(), MAX_MESSAGE_CHARS);
        assert_eq!(parts.concat(), text);
    }

    #[test]
    fn test_to_inbound_maps_bot_flag_and_direct_message() {
        let mut message = serenity::Message::default();
        message.author.bot = true;
        message.guild_id = None;
        message.channel_id = serenity::ChannelId::new(42);
        message.content = "beep".to_string();

        let inbound = to_inbound(&message);

        assert!(inbound.author_is_bot);
        assert_eq!(inbound.guild_id, None);
        assert_eq!(inbound.channel_id, 42);
        assert_eq!(inbound.content, "beep");
    }

    #[test]
    fn test_to_inbound_maps_guild_message() {
        let mut message = serenity::Message::default();
        message.author.bot = false;
        message.guild_id = Some(serenity::GuildId::new(7));
        message.channel_id = serenity::ChannelId::new(10);
        message.content = "hello".to_string();

        let inbound = to_inbound(&message);

        assert!(!inbound.author_is_bot);
        assert_eq!(inbound.guild_id, Some(7));
        assert_eq!(inbound.channel_id, 10);
    }

    /// Records sends; never returns for `stuck_channel`, like a channel
    /// waiting out a long rate limit.
    struct StallingSink {
        stuck_channel: u64,
        sent: mpsc::UnboundedSender<(u64, String)>,
    }

    #[async_trait]
    impl ReplySink for StallingSink {
        async fn send_text(&self, channel_id: u64, text: String) -> Result<(), Error> {
            if channel_id == self.stuck_channel {
                std::future::pending::<()>().await;
            }
            self.sent.send((channel_id, text))?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stalled_channel_does_not_block_other_replies() {
        let (sent_tx, mut sent_rx) = mpsc::unbounded_channel();
        let sink = Arc::new(StallingSink {
            stuck_channel: 1,
            sent: sent_tx,
        });
        let (outbound_tx, outbound_rx) = mpsc::channel(8);
        tokio::spawn(run_outbound(sink, outbound_rx));

        outbound_tx
            .send(OutboundMessage {
                channel_id: 1,
                content: "stuck".to_string(),
            })
            .await
            .unwrap();
        outbound_tx
            .send(OutboundMessage {
                channel_id: 2,
                content: "hello".to_string(),
            })
            .await
            .unwrap();

        let delivered = tokio::time::timeout(Duration::from_secs(5), sent_rx.recv())
            .await
            .expect("reply to channel 2 was held up");

        assert_eq!(delivered, Some((2, "hello".to_string())));
    }

    #[tokio::test]
    async fn test_long_reply_chunks_arrive_in_order() {
        let (sent_tx, mut sent_rx) = mpsc::unbounded_channel();
        let sink = Arc::new(StallingSink {
            stuck_channel: 0,
            sent: sent_tx,
        });
        let (outbound_tx, outbound_rx) = mpsc::channel(8);
        tokio::spawn(run_outbound(sink, outbound_rx));

        let text = format!("{}{}", "a".repeat(MAX_MESSAGE_CHARS), "b");
        outbound_tx
            .send(OutboundMessage {
                channel_id: 5,
                content: text,
            })
            .await
            .unwrap();

        let first = sent_rx.recv().await.unwrap();
        let second = sent_rx.recv().await.unwrap();

        assert_eq!(first, (5, "a".repeat(MAX_MESSAGE_CHARS)));
        assert_eq!(second, (5, "b".to_string()));
    }
}
