//! Coverage refresh engine.

pub mod cache;
pub mod entry;
pub mod layer;

#[cfg(test)]
mod tests;

pub use cache::{Pinned, RecencyCache};
pub use entry::{CoverageCache, CoverageEntry};
pub use layer::{CoverageLayer, RefreshState, RefreshStats};

use crate::mark::MarkStyle;
use crate::render::OutlineStyle;

/// Soft ceiling on cached coverages; visible entries may push past it.
pub const DEFAULT_COVERAGE_CAPACITY: usize = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageConfig {
    pub capacity: usize,
    pub coverage_style: OutlineStyle,
    pub mark_style: MarkStyle,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_COVERAGE_CAPACITY,
            coverage_style: OutlineStyle::default(),
            mark_style: MarkStyle::default(),
        }
    }
}

impl CoverageConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
