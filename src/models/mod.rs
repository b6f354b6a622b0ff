pub mod assistant;
pub mod client;
pub mod order;
pub mod product;
pub mod stats;
