pub mod intersection_cost;
pub mod slope_ops;
pub mod traversal_ops;

pub use intersection_cost::{IntersectionTraversalCostModel, SimpleTraversalCostModel};
