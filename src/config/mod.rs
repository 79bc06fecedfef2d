//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → consumed by GatewayRequest as raw configuration + server registry
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the core only re-reads it on context switch
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GatewayConfig;
pub use schema::GlobalsConfig;
pub use schema::ProbeConfig;
pub use schema::ServerConfig;
pub use schema::ServerRegistry;
