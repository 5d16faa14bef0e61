//! Domain entities

mod email_analysis;
mod email_record;
mod sync_state;

pub use email_analysis::{AnalysisDetails, EmailAnalysis, PriorityFactors};
pub use email_record::{EmailRecord, IncomingMessage};
pub use sync_state::{SyncPhase, SyncState};
