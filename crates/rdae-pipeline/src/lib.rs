pub mod grid;
pub mod report;
pub mod session;

pub use report::{EvaluationReport, ShapePolicy};
pub use session::{train, TrainingConfig};
