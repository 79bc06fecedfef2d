//! Paybox gateway request builder.
//!
//! Builds signed, context-scoped requests for the Paybox payment gateway and
//! selects a live gateway endpoint before submission. Concrete request types
//! (payment, refund, cancel) live with the caller; this crate owns the field
//! store, the canonical signing string, the HMAC computation, and the
//! primary/secondary/preprod endpoint failover.

pub mod config;
pub mod endpoint;
pub mod request;
pub mod signing;

pub use config::schema::{GatewayConfig, GlobalsConfig, RawConfiguration, ServerRegistry};
pub use endpoint::probe::{HealthProbe, HttpProbe};
pub use request::gateway::{GatewayError, GatewayRequest};
