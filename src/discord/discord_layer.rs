// Discord layer - commands, gateway event translation and message delivery.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "relay/gateway_bridge.rs"]
pub mod gateway_bridge;

use crate::core::channels::ChannelService;
use crate::core::relay::InboundMessage;
use crate::infra::channels::InMemoryChannelStore;
use std::sync::Arc;
use tokio::sync::mpsc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data that's shared across all commands and the event handler.
pub struct Data {
    pub channels: Arc<ChannelService<InMemoryChannelStore>>,
    /// Gateway messages go here; the relay task picks them up.
    pub inbound: mpsc::Sender<InboundMessage>,
}
