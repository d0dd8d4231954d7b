// Relay service - decides whether a message gets an AI reply, and produces it.
//
// No Discord types in here. The Discord layer feeds `InboundMessage`s into
// an mpsc queue and drains `OutboundMessage`s from another one, so this
// module can be driven entirely from tests.

use super::relay_models::{IgnoreReason, InboundMessage, OutboundMessage, RelayOutcome};
use crate::core::ai::{AiProvider, AiService};
use crate::core::channels::{ChannelService, ChannelStore};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct RelayService<S: ChannelStore, P: AiProvider> {
    channels: Arc<ChannelService<S>>,
    ai: Arc<AiService<P>>,
}

impl<S, P> RelayService<S, P>
where
    S: ChannelStore + 'static,
    P: AiProvider + 'static,
{
    pub fn new(channels: Arc<ChannelService<S>>, ai: Arc<AiService<P>>) -> Self {
        Self { channels, ai }
    }

    /// Handle a single message. The checks run in order and the first one
    /// that fails ends handling without calling the completion API.
    pub async fn handle(&self, message: &InboundMessage) -> RelayOutcome {
        // Never answer bots, ourselves included
        if message.author_is_bot {
            return RelayOutcome::Ignored(IgnoreReason::BotAuthor);
        }

        // Direct messages have no guild and so never have a channel
        let Some(guild_id) = message.guild_id else {
            return RelayOutcome::Ignored(IgnoreReason::NoChannelConfigured);
        };

        if !self.channels.is_watched(guild_id, message.channel_id).await {
            let reason = match self.channels.get_channel(guild_id).await {
                Some(_) => IgnoreReason::OtherChannel,
                None => IgnoreReason::NoChannelConfigured,
            };
            return RelayOutcome::Ignored(reason);
        }

        let content = self.ai.generate(&message.content).await.into_reply_text();

        RelayOutcome::Reply(OutboundMessage {
            channel_id: message.channel_id,
            content,
        })
    }

    /// Consume the inbound queue until every sender is gone.
    ///
    /// Each message is handled on its own task, so a slow completion never
    /// holds up messages from other guilds. Delivery is up to whoever drains
    /// the outbound queue.
    pub async fn run(
        self: Arc<Self>,
        mut inbound: mpsc::Receiver<InboundMessage>,
        outbound: mpsc::Sender<OutboundMessage>,
    ) {
        while let Some(message) = inbound.recv().await {
            let relay = Arc::clone(&self);
            let outbound = outbound.clone();

            tokio::spawn(async move {
                match relay.handle(&message).await {
                    RelayOutcome::Reply(reply) => {
                        if outbound.send(reply).await.is_err() {
                            tracing::error!(
                                channel_id = message.channel_id,
                                "Outbound queue closed, reply dropped"
                            );
                        }
                    }
                    RelayOutcome::Ignored(reason) => {
                        tracing::debug!(
                            channel_id = message.channel_id,
                            guild_id = ?message.guild_id,
                            ?reason,
                            "Message ignored"
                        );
                    }
                }
            });
        }

        tracing::info!("Inbound queue closed, relay stopped");
    }
}
