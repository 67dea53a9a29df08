pub mod dataset;
pub mod envelope;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod plane;

pub use dataset::*;
pub use envelope::*;
pub use error::*;
pub use geo::*;
pub use geometry::*;
pub use plane::*;
