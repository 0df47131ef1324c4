#![warn(clippy::pedantic)]

pub mod binary;
pub mod boundary;
pub mod encoding;
pub mod engine;
pub mod fault;
pub mod resync;
pub mod text;

pub use boundary::BoundaryMode;
pub use engine::{DecodeOutput, DumpDecoder};
pub use fault::{DecodeFault, FaultReason};
