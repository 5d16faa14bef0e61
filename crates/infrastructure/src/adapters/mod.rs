//! Port adapters

mod completion_adapter;

pub use completion_adapter::CompletionAdapter;
