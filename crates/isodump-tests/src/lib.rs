//! Integration test and benchmark harness for the isodump workspace.
//!
//! The [`fixtures`] module builds synthetic dumps — binary bitmap-framed
//! records and 256-character fixed-width text records — so the test
//! suites and benches can exercise the decoders without shipping real
//! settlement files (which are full of live card numbers).

pub mod fixtures;
