pub mod relay_models;
pub mod relay_service;

pub use relay_models::{IgnoreReason, InboundMessage, OutboundMessage, RelayOutcome};
pub use relay_service::RelayService;
