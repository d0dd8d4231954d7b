// In-memory implementation of ChannelStore.
//
// Bindings live for the life of the process and are gone after a restart.

use crate::core::channels::{ChannelBinding, ChannelStore};
use async_trait::async_trait;
use dashmap::DashMap;

/// DashMap-backed channel store.
///
/// Every write replaces the whole entry for a guild, so no lock beyond the
/// map's own sharding is needed. `/setchannel` and the message relay can run
/// concurrently against it.
pub struct InMemoryChannelStore {
    /// guild_id -> channel_id
    bindings: DashMap<u64, u64>,
}

impl InMemoryChannelStore {
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
        }
    }
}

#[async_trait]
impl ChannelStore for InMemoryChannelStore {
    async fn bind(&self, binding: ChannelBinding) -> Option<u64> {
        self.bindings.insert(binding.guild_id, binding.channel_id)
    }

    async fn lookup(&self, guild_id: u64) -> Option<u64> {
        self.bindings.get(&guild_id).map(|entry| *entry)
    }
}

impl Default for InMemoryChannelStore {
    fn default() -> Self {
        Self::new()
    }
}
