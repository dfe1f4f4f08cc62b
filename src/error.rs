/// Error types for session setup and frame advancement.
///
/// Nothing in the per-frame path performs I/O, so the only runtime error is
/// a broken internal invariant.  Missing assets are caught once, when the
/// session is created.

use std::fmt;

use crate::assets::AssetKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The asset catalog has no resource for a key the core will reference.
    AssetMissing {
        kind: AssetKind,
        key: &'static str,
    },

    /// An internal contract was violated, e.g. a removed entity survived
    /// into the next frame or a counter left its range.  Always a defect.
    InvalidEntityState {
        /// Human-readable description of the broken invariant.
        context: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AssetMissing { kind, key } => {
                write!(f, "missing {} asset '{}'", kind, key)
            }
            GameError::InvalidEntityState { context } => {
                write!(f, "invalid entity state: {}", context)
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
