/// A message seen on the gateway, stripped down to what the relay needs.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub author_is_bot: bool,
    /// `None` for direct messages.
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub content: String,
}

/// A plain-text message to post into a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub channel_id: u64,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BotAuthor,
    NoChannelConfigured,
    OtherChannel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Ignored(IgnoreReason),
    Reply(OutboundMessage),
}
