//! Compact identifiers for chart datasets and the features inside them.
//!
//! `DatasetId` packs the owning workspace id into the high 16 bits and the
//! dataset index into the low 48 bits, so the id alone is enough to route a
//! lookup back to its workspace.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const INDEX_BITS: u32 = 48;
const INDEX_MAX: u64 = (1 << INDEX_BITS) - 1;
const WORKSPACE_SHIFT: u32 = INDEX_BITS;

#[derive(thiserror::Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum DatasetIdError {
    #[error("dataset index {0} exceeds 48 bits")]
    IndexOverflow(u64),
}

/// Opaque, totally ordered dataset key.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DatasetId(u64);

impl DatasetId {
    /// Construct an id, panicking if the index exceeds 48 bits.
    pub fn new(workspace: u16, index: u64) -> Self {
        assert!(index <= INDEX_MAX, "Dataset index {index} exceeds 48 bits");
        Self(((workspace as u64) << WORKSPACE_SHIFT) | index)
    }

    pub fn try_new(workspace: u16, index: u64) -> Result<Self, DatasetIdError> {
        if index > INDEX_MAX {
            return Err(DatasetIdError::IndexOverflow(index));
        }
        Ok(Self::new(workspace, index))
    }

    #[inline(always)]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub fn workspace(self) -> u16 {
        (self.0 >> WORKSPACE_SHIFT) as u16
    }

    #[inline(always)]
    pub fn index(self) -> u64 {
        self.0 & INDEX_MAX
    }

    #[inline(always)]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workspace(), self.index())
    }
}

/// A feature inside a dataset.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub did: DatasetId,
    pub feature: u64,
}

impl ObjectId {
    pub const fn new(did: DatasetId, feature: u64) -> Self {
        Self { did, feature }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.did, self.feature)
    }
}
