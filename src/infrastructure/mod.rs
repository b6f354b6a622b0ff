pub mod backend_api;
pub mod decoder;
pub mod frames;
