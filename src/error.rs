//! Error types raised by the equipment-control engine.

use std::fmt;

/// Which part of the topology an out-of-range index was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTarget {
    Floor,
    MainCorridor,
    SubCorridor,
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexTarget::Floor => "floor",
            IndexTarget::MainCorridor => "main corridor",
            IndexTarget::SubCorridor => "sub corridor",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by [`Hotel`](crate::hotel::Hotel) construction and queries.
///
/// Every operation resolves its indices before touching equipment state, so
/// receiving one of these means nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotelError {
    /// Topology counts or the power table are unusable.
    #[error("configuration error: `{field}` {reason}")]
    Configuration { field: &'static str, reason: String },

    /// A 1-based floor or corridor number lies outside the built topology.
    #[error("{target} {index} is out of range (valid: 1..={len})")]
    IndexOutOfRange {
        target: IndexTarget,
        index: usize,
        len: usize,
    },
}

impl HotelError {
    pub(crate) fn out_of_range(target: IndexTarget, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { target, index, len }
    }
}
