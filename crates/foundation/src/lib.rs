pub mod bounds;
pub mod geo;
pub mod math;
pub mod view;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use geo::*;
pub use view::*;
