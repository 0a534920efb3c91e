mod agent;
pub mod geometry;
pub mod pipeline;
pub mod threats;
mod trap_agent;
pub mod traps;

pub use agent::{Agent, Decision, Reason};
pub use geometry::LineGeometry;
pub use pipeline::MoveFilter;
pub use threats::{Parity, ThreatAnalyzer, ThreatSummary, Threats};
pub use trap_agent::TrapAgent;
pub use traps::TrapAnalyzer;
