#![warn(clippy::pedantic)]

pub mod ascii;
pub mod bitmap;
pub mod error;
pub mod mti;

pub use error::WireError;
