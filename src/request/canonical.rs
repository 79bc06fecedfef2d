//! Canonical signing string.
//!
//! The gateway signs `NAME=VALUE&NAME=VALUE&...` with names in ascending
//! byte-wise order and values exactly as stored — no URL escaping. That is
//! the gateway's wire format for the signed payload, not an omission.

use crate::request::params::ParameterStore;

/// The gateway's own signature field. Never signed over itself.
pub const SIGNATURE_FIELD: &str = "PBX_HMAC";

/// Build the canonical signing string over the current fields.
///
/// Deterministic: any insertion order of the same logical fields yields the
/// same output. The store iterates in sorted key order already; this only
/// has to skip the signature field and join.
pub fn canonicalize(parameters: &ParameterStore) -> String {
    let mut out = String::new();
    for (name, value) in parameters.iter() {
        if name == SIGNATURE_FIELD {
            continue;
        }
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(name);
        out.push('=');
        out.push_str(value);
    }
    out
}
