//! Request construction subsystem.
//!
//! # Responsibilities
//! - Hold the mutable field map for the request being built (`params`)
//! - Resolve per-context globals and default fields (`context`)
//! - Derive the canonical signing string (`canonical`)
//! - Compose the public request contract (`gateway`)

pub mod canonical;
pub mod context;
pub mod gateway;
pub mod params;

pub use context::{ConfigProfile, ContextError, ContextProfile};
pub use gateway::{GatewayError, GatewayRequest};
pub use params::ParameterStore;
