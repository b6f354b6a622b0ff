pub mod cart;
pub mod chat;
pub mod client;
pub mod errors;
pub mod order;
pub mod ports;
pub mod product;
pub mod role;
pub mod scan;
