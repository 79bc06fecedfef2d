//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check signing globals (hex keys, supported algorithms)
//! - Check server registry completeness for the contexts that need it
//! - Validate value ranges (probe timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::{GatewayConfig, ServerConfig};
use crate::signing::HmacAlgorithm;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No contexts configured at all.
    NoContexts,
    /// A context's HMAC key is not a valid hex string.
    BadHmacKey { context: String },
    /// A context names an algorithm the signer does not support.
    UnsupportedAlgorithm { context: String, algorithm: String },
    /// A server slot needed by some context has no host.
    MissingServerHost { slot: &'static str },
    /// A server slot has an empty protocol.
    MissingServerProtocol { slot: &'static str },
    /// Probe timeout must be nonzero.
    ZeroProbeTimeout,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoContexts => write!(f, "no contexts configured"),
            ValidationError::BadHmacKey { context } => {
                write!(f, "context '{}': hmac_key is not valid hex", context)
            }
            ValidationError::UnsupportedAlgorithm { context, algorithm } => {
                write!(
                    f,
                    "context '{}': unsupported hmac_algorithm '{}'",
                    context, algorithm
                )
            }
            ValidationError::MissingServerHost { slot } => {
                write!(f, "server '{}': host is empty", slot)
            }
            ValidationError::MissingServerProtocol { slot } => {
                write!(f, "server '{}': protocol is empty", slot)
            }
            ValidationError::ZeroProbeTimeout => write!(f, "probe timeout_secs must be > 0"),
        }
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.contexts.is_empty() {
        errors.push(ValidationError::NoContexts);
    }

    let mut any_production = false;
    let mut any_preprod = false;

    for (name, context) in &config.contexts {
        if hex::decode(&context.globals.hmac_key).is_err() {
            errors.push(ValidationError::BadHmacKey {
                context: name.clone(),
            });
        }
        if context.globals.hmac_algorithm.parse::<HmacAlgorithm>().is_err() {
            errors.push(ValidationError::UnsupportedAlgorithm {
                context: name.clone(),
                algorithm: context.globals.hmac_algorithm.clone(),
            });
        }
        if context.globals.production {
            any_production = true;
        } else {
            any_preprod = true;
        }
    }

    // Only the server slots some context can actually select are required.
    if any_production {
        check_server(&config.servers.primary, "primary", &mut errors);
        check_server(&config.servers.secondary, "secondary", &mut errors);
    }
    if any_preprod {
        check_server(&config.servers.preprod, "preprod", &mut errors);
    }

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_server(server: &ServerConfig, slot: &'static str, errors: &mut Vec<ValidationError>) {
    if server.host.is_empty() {
        errors.push(ValidationError::MissingServerHost { slot });
    }
    if server.protocol.is_empty() {
        errors.push(ValidationError::MissingServerProtocol { slot });
    }
}
