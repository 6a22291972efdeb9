//! Error types for explicit lookups.

use crate::dependencies::types::ContextId;
use thiserror::Error;

/// Errors reported by the opt-in lookup surface ([`Context::lookup`]).
///
/// The core operations never fail; these only surface when a caller asks
/// for the provided value of a context explicitly.
///
/// [`Context::lookup`]: crate::dependencies::Context::lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectError {
    /// No entry for the context exists in the environment.
    #[error("NOT PROVIDED: context {context} has no entry in this environment")]
    NotProvided {
        /// Context that was looked up.
        context: ContextId,
    },

    /// An entry exists but does not hold the context's value type.
    #[error("DOWNCAST ERROR: context {context} required '{required_type}' actual '{actual_type}'")]
    DowncastFailed {
        /// Context that was looked up.
        context: ContextId,
        /// Type the context declares.
        required_type: &'static str,
        /// Type recorded for the stored entry.
        actual_type: &'static str,
    },
}

impl InjectError {
    /// Stable machine-readable code for this error.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotProvided { .. } => "INJECT_NOT_PROVIDED",
            Self::DowncastFailed { .. } => "INJECT_DOWNCAST_FAILED",
        }
    }

    /// The context the failed lookup was made for.
    pub const fn context(&self) -> ContextId {
        match self {
            Self::NotProvided { context } | Self::DowncastFailed { context, .. } => *context,
        }
    }
}
