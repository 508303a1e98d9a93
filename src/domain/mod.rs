//! Form model: field descriptors, field values and pattern validation.
//!
//! Everything in this module is free of I/O and session state. The
//! [`adapters`](crate::adapters) layer wires these types into a running form.

pub mod error;
pub mod schema;
pub mod validation;
pub mod value;

pub use error::{PatternCompileError, SchemaParseError};
pub use schema::{FieldDescriptor, FieldId, FieldKey, FieldType, FormDefinition, SchemaFormat};
pub use validation::{validate, PatternCache, VALIDATION_FAILED};
pub use value::{Choice, FieldValue, SchemaValue, ValueKind};
