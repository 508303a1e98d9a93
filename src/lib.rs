//! # dynform - Schema-Driven Forms
//!
//! dynform renders a form from a declarative list of field descriptors,
//! collects edits against it, validates each field against an optional
//! regular-expression rule and publishes an immutable snapshot of the values
//! once every rule passes.
//!
//! ## Quick Start
//!
//! ```rust
//! use dynform::adapters::{FormSession, SubmitOutcome};
//! use dynform::domain::{FieldKey, SchemaFormat};
//!
//! let mut session = FormSession::new();
//! session.load_str(r#"[{"type": "text", "validation": "^[a-z]+$"}]"#, SchemaFormat::Json)?;
//!
//! session.edit_key(FieldKey(0), "abc");
//! match session.submit() {
//!     SubmitOutcome::Submitted(snapshot) => {
//!         assert_eq!(snapshot.to_json_string(false)?, r#"{"field0":"abc"}"#);
//!     }
//!     SubmitOutcome::Rejected { failed } => panic!("rejected: {:?}", failed),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: schema model, typed field values, validation engine
//! - **Adapters**: form state store, field dispatcher, submission controller,
//!   the session that ties them together, and the terminal front end
//! - **Config**: layered settings for the `dynform` binary

pub mod adapters;
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod config;
pub mod domain;
