//! Sort-key arithmetic shared by allocation, reconciliation, and batch
//! validation.
//!
//! Positions are allocated on a gapped scale so that future insertions can
//! be interleaved without renumbering a whole column. The allocator
//! appends with [`Position::following`], the reconciliation engine
//! renumbers with [`Position::at_rank`], and batch validation enforces the
//! same bounds through [`Position::new`]. Keeping all three on one scale
//! is what makes their outputs mutually valid.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer sort key establishing total order within a (workspace, status)
/// partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(i64);

impl Position {
    /// Gap between adjacent canonical sort keys.
    pub const STEP: i64 = 1000;

    /// Smallest admissible sort key; also the key handed to the first
    /// card of an empty partition.
    pub const FLOOR: Self = Self(Self::STEP);

    /// Largest admissible sort key.
    pub const CEILING: Self = Self(1_000_000);

    /// Creates a validated position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::PositionOutOfBounds`] when the value
    /// lies outside `FLOOR..=CEILING`.
    pub const fn new(value: i64) -> Result<Self, BoardDomainError> {
        if value < Self::FLOOR.0 || value > Self::CEILING.0 {
            return Err(BoardDomainError::PositionOutOfBounds(value));
        }
        Ok(Self(value))
    }

    /// Returns the canonical sort key for the card at `rank` within its
    /// column, counting from zero.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnCapacityExceeded`] when the rank
    /// no longer fits under [`Self::CEILING`].
    pub fn at_rank(rank: usize) -> Result<Self, BoardDomainError> {
        let overflow = BoardDomainError::ColumnCapacityExceeded(rank);
        let slot = i64::try_from(rank)
            .ok()
            .and_then(|rank| rank.checked_add(1))
            .and_then(|slot| slot.checked_mul(Self::STEP))
            .ok_or_else(|| overflow.clone())?;
        Self::new(slot).map_err(|_| overflow)
    }

    /// Returns the sort key one gap beyond this one, used to append at
    /// the tail of a partition.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::PositionOutOfBounds`] when the next
    /// key would pass [`Self::CEILING`]; the partition is full.
    pub const fn following(self) -> Result<Self, BoardDomainError> {
        Self::new(self.0 + Self::STEP)
    }

    /// Returns the underlying sort-key value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
