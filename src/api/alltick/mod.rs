pub mod client;
pub mod models;

pub use client::AlltickClient;
pub use models::ApiError;
