#![warn(clippy::pedantic)]

pub mod error;
pub mod field;
pub mod layout;
pub mod record;
pub mod registry;
pub mod spec;
pub mod value;

pub use error::SpecError;
pub use field::{DecodeStrategy, FieldDefinition, ValueClass};
pub use record::{DecodedRecord, Diagnostic, RecordFormat, RecordStatus, Validation};
pub use spec::{FieldRule, MessageSpec, SpecSet};
pub use value::FieldValue;
