//! Reading and writing the zip package and its parts
pub mod utils;
pub mod xlsx;
