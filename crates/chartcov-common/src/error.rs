//! Coverage error representation.
//!
//! - **`CoverageErrorKind`**: what went wrong
//! - **`CoverageError`**: the kind plus an optional message and the dataset
//!   the failure belongs to, if any
//!
//! Setup kinds abort a whole refresh pass; the remaining kinds are scoped to
//! one dataset and only make that dataset miss the current pass.

use std::{error::Error, fmt};

use crate::dataset::{DatasetId, DatasetIdError};
use crate::geo::GeoError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoverageErrorKind {
    /// No workspace selected, or a required collaborator is missing.
    Uninitialized,
    /// A refresh pass is already in flight.
    Busy,
    WorkspaceNotFound,
    /// Clone, parameter update or transform failure in the projection.
    Projection,
    /// Spatial query or lookup failure in the catalog.
    Catalog,
    /// Missing or malformed dataset property.
    Property,
    /// The shape yielded no usable outline.
    Geometry,
    /// Malformed geographic bounds.
    Envelope,
    /// The drawing surface rejected an operation.
    Render,
}

impl fmt::Display for CoverageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Busy => "busy",
            Self::WorkspaceNotFound => "workspace not found",
            Self::Projection => "projection",
            Self::Catalog => "catalog",
            Self::Property => "dataset property",
            Self::Geometry => "geometry",
            Self::Envelope => "envelope",
            Self::Render => "render",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverageError {
    pub kind: CoverageErrorKind,
    pub message: Option<String>,
    pub dataset: Option<DatasetId>,
}

impl From<CoverageErrorKind> for CoverageError {
    fn from(kind: CoverageErrorKind) -> Self {
        Self {
            kind,
            message: None,
            dataset: None,
        }
    }
}

impl CoverageError {
    pub fn new(kind: CoverageErrorKind) -> Self {
        kind.into()
    }

    /// Attach a human-readable explanation.
    pub fn with_message<S: Into<String>>(mut self, msg: S) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Attach the dataset the failure belongs to.
    pub fn with_dataset(mut self, did: DatasetId) -> Self {
        self.dataset = Some(did);
        self
    }

    pub fn uninitialized<S: Into<String>>(msg: S) -> Self {
        Self::new(CoverageErrorKind::Uninitialized).with_message(msg)
    }

    pub fn projection<S: Into<String>>(msg: S) -> Self {
        Self::new(CoverageErrorKind::Projection).with_message(msg)
    }

    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        Self::new(CoverageErrorKind::Catalog).with_message(msg)
    }

    pub fn property<S: Into<String>>(msg: S) -> Self {
        Self::new(CoverageErrorKind::Property).with_message(msg)
    }

    pub fn geometry<S: Into<String>>(msg: S) -> Self {
        Self::new(CoverageErrorKind::Geometry).with_message(msg)
    }

    pub fn render<S: Into<String>>(msg: S) -> Self {
        Self::new(CoverageErrorKind::Render).with_message(msg)
    }

    /// True for failures that abort a refresh before any entry is touched.
    pub fn is_setup_failure(&self) -> bool {
        self.dataset.is_none()
            && matches!(
                self.kind,
                CoverageErrorKind::Uninitialized
                    | CoverageErrorKind::Busy
                    | CoverageErrorKind::WorkspaceNotFound
                    | CoverageErrorKind::Projection
                    | CoverageErrorKind::Catalog
            )
    }
}

impl fmt::Display for CoverageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        if let Some(did) = self.dataset {
            write!(f, " (dataset {did})")?;
        }
        Ok(())
    }
}

impl Error for CoverageError {}

impl From<GeoError> for CoverageError {
    fn from(err: GeoError) -> Self {
        Self::new(CoverageErrorKind::Envelope).with_message(err.to_string())
    }
}

impl From<DatasetIdError> for CoverageError {
    fn from(err: DatasetIdError) -> Self {
        Self::new(CoverageErrorKind::Catalog).with_message(err.to_string())
    }
}
