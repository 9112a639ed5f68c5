//! Domain types with no I/O dependencies.

pub mod matrix;

pub use matrix::{Matrix, MatrixError};
