//! Order lifecycle
//!
//! - **policy**: meal cutoff times and the cutoff check
//! - **service**: create / cancel / update, today's and weekly views, weekly batch save
//!
//! # Data Flow
//!
//! ```text
//! handler → OrderService ─ cutoff check (non-admin only)
//!                         ─ employee lookup
//!                         → OrderRepository → orders.json
//! ```

pub mod policy;
pub mod service;

pub use policy::{cutoff_time, is_cutoff_passed};
pub use service::{OrderChange, OrderService};
