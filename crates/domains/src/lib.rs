//! review-board/crates/domains/src/lib.rs
//!
//! The central domain types and interface definitions for the review board.

pub mod errors;
pub mod models;
pub mod ports;
pub mod view;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
pub use view::*;
