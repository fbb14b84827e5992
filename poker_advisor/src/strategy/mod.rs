//! Strategy blending: the baseline policy plus opponent-specific
//! adjustments, fused into a single mixed action distribution.

pub mod blender;
pub mod models;

pub use blender::StrategyBlender;
pub use models::{ActionDistribution, AdvisedAction, BaselineStrategy, PolicyAction};
