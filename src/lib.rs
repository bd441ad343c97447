pub mod error;
pub mod math;
pub mod model;
pub mod semantics;
pub mod tiling;

pub use error::{Result, UrbisError};
