//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod completion_port;
mod email_store_port;

#[cfg(test)]
pub use completion_port::MockCompletionPort;
pub use completion_port::{CompletionCallError, CompletionParams, CompletionPort};
#[cfg(test)]
pub use email_store_port::MockEmailStorePort;
pub use email_store_port::{EmailQuery, EmailStoreError, EmailStorePort, StatusUpdate};
