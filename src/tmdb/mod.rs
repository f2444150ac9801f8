pub mod catalog;
pub mod client;
pub mod types;

pub use client::*;
pub use types::*;
