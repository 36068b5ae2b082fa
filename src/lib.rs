pub mod core;
pub mod nport;
pub mod pipeline;
pub mod report;

// Re-exports
pub use nport::flatten::{flatten, FlatRecord};
pub use nport::schema::{ExtractionSchema, FieldRule};
