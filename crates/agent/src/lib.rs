//! Opinion agent: the tool registry and the evaluation flow that wires
//! the scoring core to the record stores.

pub mod flow;
pub mod tools;

pub use flow::{EvaluationRequest, FlowError, FlowOutcome, OpinionFlow};
pub use tools::{Tool, ToolRegistry};
