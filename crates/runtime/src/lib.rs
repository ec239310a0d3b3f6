pub mod bindings;
pub mod budget;
pub mod error;
pub mod gate;
pub mod tick;
pub mod wait;

pub use bindings::*;
pub use budget::*;
pub use error::*;
pub use gate::*;
pub use tick::*;
pub use wait::*;
