pub mod engine;
pub mod expirations;
pub mod roi;
pub mod select;
pub mod types;
