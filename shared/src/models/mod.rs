//! Domain models for the Harvest Guard platform

mod batch;
mod forecast;
mod risk;

pub use batch::*;
pub use forecast::*;
pub use risk::*;
