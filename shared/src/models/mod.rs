//! Data models
//!
//! Stored records keep the legacy PascalCase field names of the JSON data
//! files; API DTOs are camelCase.

pub mod department;
pub mod employee;
pub mod meal_order;
pub mod order_window;
pub mod serde_helpers;
pub mod stats;

// Re-exports
pub use department::*;
pub use employee::*;
pub use meal_order::*;
pub use order_window::*;
pub use stats::*;
