//! Map bootstrap: the capability a mapping library has to offer, the
//! configuration a host page supplies, and the two initializers that turn one
//! into calls on the other.

pub mod backend;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod init;

pub use backend::*;
pub use bootstrap::*;
pub use config::*;
pub use error::*;
pub use init::*;
