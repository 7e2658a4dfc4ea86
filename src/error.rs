//! Error types for the simulation core
//!
//! Nothing here is fatal: callers log the error and keep the session running.

use crate::sim::{Screen, ScreenInput};

/// Errors raised by gameplay entry points
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Shoot requested without a usable aim pose
    #[error("no valid aim origin, shot dropped")]
    MissingAimOrigin,

    /// Live bullet population is at its cap
    #[error("bullet limit reached ({0} live), shot dropped")]
    BulletLimit(usize),

    /// Screen transition not present in the transition table
    #[error("screen {from:?} does not accept {input:?}")]
    InvalidTransition { from: Screen, input: ScreenInput },

    /// Score ledger failure
    #[error("score ledger: {0}")]
    Ledger(#[from] LedgerError),
}

/// Score persistence errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// Backing storage could not be reached
    #[error("storage unavailable")]
    Unavailable,

    /// Score list could not be encoded
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// Stored score list was unreadable
    #[error("stored scores unreadable: {0}")]
    Parse(String),

    /// Storage rejected the write (quota, private mode)
    #[error("write rejected: {0}")]
    Write(String),
}
