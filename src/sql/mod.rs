//! Bound parameters and row decoding. Statement text never carries caller values.

pub mod params;
pub mod row;
pub use params::*;
pub use row::*;
