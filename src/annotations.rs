mod csv;
mod error;
mod store;


pub use error::{AnnotationError, Result};
pub use store::{AnnotationStore, LoadOutcome};
