use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::automation::CommandBridge;
use crate::config::Config;

/// Shared state for the embedded control agent.
pub struct AppState {
    /// Dispatch surface into the automation core.
    pub bridge: CommandBridge,
    /// Identity of this agent instance, minted at start.
    pub instance_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub config: Config,
}

impl AppState {
    pub fn new(bridge: CommandBridge, config: Config) -> Self {
        Self {
            bridge,
            instance_id: Uuid::new_v4(),
            started_at: Utc::now(),
            config,
        }
    }
}
