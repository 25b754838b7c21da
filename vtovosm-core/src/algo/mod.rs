pub mod classification;
pub mod conditions;
pub mod orthogonality;
pub mod placement;
pub mod scenario;
pub mod visibility_graph;
