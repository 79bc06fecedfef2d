//! Endpoint selection with failover.
//!
//! # Responsibilities
//! - Build the candidate list from the context's production flag
//! - Probe candidates strictly in priority order, one at a time
//! - Return the first live server, or fail once the list is exhausted
//!
//! Probes are never fanned out concurrently: probing secondary before
//! primary's failure is confirmed would break the failover priority.

use thiserror::Error;

use crate::config::schema::{GlobalsConfig, ServerConfig, ServerRegistry};
use crate::endpoint::probe::{page_reports_ok, HealthProbe};

/// Errors raised during endpoint selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServerError {
    /// Every candidate failed its health probe.
    #[error("no gateway server available")]
    NoneAvailable,
}

/// Find the first live server for the given context.
///
/// Production contexts try `primary` then `secondary`; everything else
/// probes only `preprod`. Transport failures and pages without a live
/// status marker both count as unhealthy.
pub async fn select_endpoint<P: HealthProbe>(
    globals: &GlobalsConfig,
    servers: &ServerRegistry,
    probe: &P,
) -> Result<ServerConfig, ServerError> {
    let candidates: Vec<(&str, &ServerConfig)> = if globals.production {
        vec![("primary", &servers.primary), ("secondary", &servers.secondary)]
    } else {
        vec![("preprod", &servers.preprod)]
    };

    for (slot, server) in candidates {
        let url = server.health_url();

        match probe.fetch(&url).await {
            Ok(body) if page_reports_ok(&body) => {
                tracing::debug!(slot, host = %server.host, "gateway server is live");
                return Ok(server.clone());
            }
            Ok(_) => {
                tracing::warn!(slot, host = %server.host, "gateway server reports not ready");
            }
            Err(e) => {
                tracing::warn!(slot, host = %server.host, error = %e, "health probe failed");
            }
        }
    }

    Err(ServerError::NoneAvailable)
}
