//! Endpoint selection subsystem.
//!
//! # Responsibilities
//! - Probe gateway servers through an injected fetch capability (`probe`)
//! - Pick the first healthy server in failover priority order (`selector`)

pub mod probe;
pub mod selector;

pub use probe::{HealthProbe, HttpProbe, ProbeError};
pub use selector::{select_endpoint, ServerError};
