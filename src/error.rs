//! Error types for handoff.

use thiserror::Error;

use crate::chain::HandlerId;

/// Construction-time contract violations for a handler chain.
///
/// A request that no handler accepts is *not* an error; see
/// [`Outcome::Unhandled`](crate::Outcome::Unhandled).
#[derive(Debug, Error)]
pub enum ChainError {
    /// The id was not issued by this chain.
    #[error("Unknown handler: {0}")]
    UnknownHandler(HandlerId),

    /// Installing the link would make the successor path loop back.
    #[error("Linking {handler} -> {next} would create a cycle")]
    Cycle {
        /// Handler whose successor was being set.
        handler: HandlerId,
        /// Rejected successor.
        next: HandlerId,
    },

    /// Dispatch visited more handlers than allowed.
    #[error("Dispatch from {entry} exceeded {limit} hops")]
    HopLimit {
        /// Entry handler of the aborted dispatch.
        entry: HandlerId,
        /// Hop budget in effect.
        limit: usize,
    },

    /// Invalid JSON configuration.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias using ChainError.
pub type Result<T> = std::result::Result<T, ChainError>;
