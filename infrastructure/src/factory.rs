//! Gateway selection from configuration

use crate::config::FileConfig;
use crate::http::gateway::HttpCheckInGateway;
use crate::mock::gateway::MockCheckInGateway;
use checkin_application::ports::checkin_gateway::{CheckInGateway, GatewayError};
use checkin_domain::GatewayMode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the gateway named by `[gateway] mode`
pub fn build_gateway(config: &FileConfig) -> Result<Arc<dyn CheckInGateway>, GatewayError> {
    info!(mode = %config.gateway.mode, "Selecting check-in gateway");

    match config.gateway.mode {
        GatewayMode::Mock => Ok(Arc::new(
            MockCheckInGateway::new()
                .with_latency(Duration::from_millis(config.mock.latency_ms)),
        )),
        GatewayMode::Live => Ok(Arc::new(HttpCheckInGateway::new(&config.http)?)),
    }
}
