//! Gateway request composition root.
//!
//! One `GatewayRequest` represents one outbound transaction being built:
//! the raw multi-context configuration, the server registry, and a single
//! state record (active context + field store) that every context switch
//! replaces wholesale. Concrete request types layer their own fields on top
//! through the setters here.
//!
//! Instances are not meant to be shared across threads; the intended usage
//! is one request object per logical transaction.

use thiserror::Error;

use crate::config::schema::{GlobalsConfig, RawConfiguration, ServerConfig, ServerRegistry};
use crate::endpoint::probe::HealthProbe;
use crate::endpoint::selector::{select_endpoint, ServerError};
use crate::request::canonical::canonicalize;
use crate::request::context::{ConfigProfile, ContextError, ContextProfile};
use crate::request::params::ParameterStore;
use crate::signing::{sign, SigningError};

/// Errors surfaced by the public request contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Signature or endpoint operation attempted before any successful
    /// context switch.
    #[error("no request context set")]
    NoContext,

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Active context portion of the request state.
#[derive(Debug, Clone)]
struct ActiveContext {
    name: String,
    globals: GlobalsConfig,
}

/// The whole mutable state of a request. `set_context` swaps this record
/// out rather than mutating pieces, which is what makes the
/// discard-on-context-switch behavior explicit.
#[derive(Debug, Clone, Default)]
struct RequestState {
    context: Option<ActiveContext>,
    parameters: ParameterStore,
}

/// Builder for one signed, context-scoped gateway request.
#[derive(Debug, Clone)]
pub struct GatewayRequest<P = ConfigProfile> {
    raw: RawConfiguration,
    servers: ServerRegistry,
    profile: P,
    state: RequestState,
}

impl GatewayRequest<ConfigProfile> {
    /// Create a context-less request over the given configuration and
    /// server registry, resolving contexts straight from the configuration.
    pub fn new(raw: RawConfiguration, servers: ServerRegistry) -> Self {
        Self::with_profile(raw, servers, ConfigProfile)
    }
}

impl<P: ContextProfile> GatewayRequest<P> {
    /// Create a request with a custom context resolution strategy.
    pub fn with_profile(raw: RawConfiguration, servers: ServerRegistry, profile: P) -> Self {
        Self {
            raw,
            servers,
            profile,
            state: RequestState::default(),
        }
    }

    /// Switch to the named context.
    ///
    /// On success the previous state record is discarded entirely: globals
    /// are re-derived and the field store is reseeded from the context's
    /// defaults, even when the name is already the active one. On failure
    /// the prior state stays untouched.
    pub fn set_context(&mut self, context: Option<&str>) -> Result<&mut Self, GatewayError> {
        let resolved = self.profile.resolve(&self.raw, context)?;
        // resolve() rejected the empty/missing sentinel already
        let name = context.unwrap_or_default().to_string();

        let mut parameters = ParameterStore::new();
        parameters.set_all(resolved.defaults);

        tracing::debug!(context = %name, fields = parameters.len(), "request context set");

        self.state = RequestState {
            context: Some(ActiveContext {
                name,
                globals: resolved.globals,
            }),
            parameters,
        };

        Ok(self)
    }

    /// Name of the active context, if any.
    pub fn context(&self) -> Option<&str> {
        self.state.context.as_ref().map(|c| c.name.as_str())
    }

    /// Signing globals of the active context, if any.
    pub fn globals(&self) -> Option<&GlobalsConfig> {
        self.state.context.as_ref().map(|c| &c.globals)
    }

    /// Replace the raw multi-context configuration wholesale. Takes effect
    /// on the next context switch; the active state is left alone.
    pub fn set_raw_parameters(&mut self, raw: RawConfiguration) -> &mut Self {
        self.raw = raw;
        self
    }

    /// The raw multi-context configuration.
    pub fn raw_parameters(&self) -> &RawConfiguration {
        &self.raw
    }

    /// Set one field, keyed case-insensitively.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.state.parameters.set(name, value);
        self
    }

    /// Set a batch of fields.
    pub fn set_parameters<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.state.parameters.set_all(entries);
        self
    }

    /// Read one field, keyed case-insensitively.
    pub fn get_parameter(&self, name: &str) -> Option<&str> {
        self.state.parameters.get(name)
    }

    /// Canonical signing string over the current fields.
    pub fn canonical_string(&self) -> String {
        canonicalize(&self.state.parameters)
    }

    /// Compute the lowercase-hex HMAC signature over the current fields
    /// using the active context's key and algorithm.
    pub fn compute_signature(&self) -> Result<String, GatewayError> {
        let active = self.state.context.as_ref().ok_or(GatewayError::NoContext)?;
        let canonical = canonicalize(&self.state.parameters);
        Ok(sign(&active.globals, &canonical)?)
    }

    /// Find a live gateway server for the active context, probing in
    /// failover priority order.
    pub async fn resolve_endpoint<H: HealthProbe>(
        &self,
        probe: &H,
    ) -> Result<ServerConfig, GatewayError> {
        let active = self.state.context.as_ref().ok_or(GatewayError::NoContext)?;
        Ok(select_endpoint(&active.globals, &self.servers, probe).await?)
    }
}
