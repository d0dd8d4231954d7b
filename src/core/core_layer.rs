// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "channels/mod.rs"]
pub mod channels;

#[path = "relay/mod.rs"]
pub mod relay;
