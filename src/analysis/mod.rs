pub mod bounding_box;
pub mod scenario;

pub use bounding_box::BoundingBox;
pub use scenario::{EvalOptions, MirrorKind, Scenario, ScenarioResult, TangentInfo};
