pub mod pipelines;
pub mod workflow;

pub use workflow::{ReminderWorkflow, RunSummary};
