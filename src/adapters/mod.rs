pub mod dispatcher;
pub mod loader;
pub mod session;
pub mod state_manager;
pub mod submission;
pub mod terminal;

pub use dispatcher::{EditEvent, FieldDispatcher, InputWidget, RenderedField, EMPTY_OPTION_LABEL};
pub use loader::{LoadError, SchemaLoader};
pub use session::{FormSession, RenderedForm};
pub use state_manager::FormStateStore;
pub use submission::{SubmissionController, SubmissionSnapshot, SubmissionState, SubmitOutcome};
pub use terminal::TerminalRenderer;
