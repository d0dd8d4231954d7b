// Channel registry - which channel the bot answers in, per guild.
//
// Pure domain logic: guild and channel ids are plain u64 so nothing here
// depends on serenity. The store behind it is injected, the same way the
// other services in `core` receive theirs.

use async_trait::async_trait;

/// A guild's designated reply channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBinding {
    pub guild_id: u64,
    pub channel_id: u64,
}

/// Storage port for channel bindings.
///
/// Implementations hold at most one channel per guild. Binding a guild that
/// already has a channel replaces it.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// Store the binding, returning the channel it replaced (if any).
    async fn bind(&self, binding: ChannelBinding) -> Option<u64>;

    async fn lookup(&self, guild_id: u64) -> Option<u64>;
}

pub struct ChannelService<S: ChannelStore> {
    store: S,
}

impl<S: ChannelStore> ChannelService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Designate `channel_id` as the reply channel for `guild_id`.
    ///
    /// Unconditionally overwrites an earlier binding for the same guild.
    pub async fn set_channel(&self, guild_id: u64, channel_id: u64) -> Option<u64> {
        let previous = self
            .store
            .bind(ChannelBinding {
                guild_id,
                channel_id,
            })
            .await;

        tracing::info!(guild_id, channel_id, ?previous, "Reply channel updated");
        previous
    }

    pub async fn get_channel(&self, guild_id: u64) -> Option<u64> {
        self.store.lookup(guild_id).await
    }

    /// True only if the guild has a binding and it points at `channel_id`.
    pub async fn is_watched(&self, guild_id: u64, channel_id: u64) -> bool {
        self.get_channel(guild_id).await == Some(channel_id)
    }
}
