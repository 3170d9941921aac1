pub mod roster_pipeline;
pub mod schedule_pipeline;

pub use roster_pipeline::RosterPipeline;
pub use schedule_pipeline::SchedulePipeline;

use crate::utils::error::Result;
use serde::Serialize;

/// Pretty JSON with four-space indentation, the layout of the persisted artifacts.
pub(crate) fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}
