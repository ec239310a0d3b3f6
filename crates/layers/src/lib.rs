pub mod layer;
pub mod marker;
pub mod tiles;

pub use layer::*;
pub use marker::*;
pub use tiles::*;
