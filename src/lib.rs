pub mod analysis;
pub mod error;
pub mod geometry;
pub mod math;
pub mod trace;

pub use error::{CatoptricError, Result};
