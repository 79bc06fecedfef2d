//! Context resolution.
//!
//! A context is a named configuration profile (sandbox vs. live) selecting
//! which signing globals and default fields are active. Resolution is pure:
//! the caller (`GatewayRequest`) applies the result.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::schema::{GlobalsConfig, RawConfiguration};

/// Errors raised while resolving a context name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The context argument was missing or empty.
    #[error("request context is undefined")]
    Undefined,

    /// The context name has no entry in the raw configuration.
    #[error("request context '{0}' is not configured")]
    Unknown(String),
}

/// Outcome of a successful context resolution.
#[derive(Debug, Clone)]
pub struct ResolvedContext {
    /// Signing and environment settings for the context.
    pub globals: GlobalsConfig,

    /// Default field values to seed into the parameter store.
    pub defaults: BTreeMap<String, String>,
}

/// Strategy for turning a context name into globals and default fields.
///
/// Concrete gateway operations can supply their own implementation to seed
/// operation-specific defaults; [`ConfigProfile`] reads the configuration
/// entry verbatim.
pub trait ContextProfile {
    fn resolve(
        &self,
        raw: &RawConfiguration,
        context: Option<&str>,
    ) -> Result<ResolvedContext, ContextError>;
}

/// Default profile: globals and defaults come straight from the
/// configuration entry for the named context.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigProfile;

impl ContextProfile for ConfigProfile {
    fn resolve(
        &self,
        raw: &RawConfiguration,
        context: Option<&str>,
    ) -> Result<ResolvedContext, ContextError> {
        let name = match context {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ContextError::Undefined),
        };

        let entry = raw
            .get(name)
            .ok_or_else(|| ContextError::Unknown(name.to_string()))?;

        Ok(ResolvedContext {
            globals: entry.globals.clone(),
            defaults: entry.parameters.clone(),
        })
    }
}
