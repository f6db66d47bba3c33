//! Type definitions for invsum

mod error;
mod invoice;

pub use error::*;
pub use invoice::*;
