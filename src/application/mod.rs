pub mod assistant;
pub mod capture;
pub mod order_service;
