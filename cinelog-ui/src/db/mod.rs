//! Database operations for cinelog-ui
//!
//! The list module owns the membership store and the rating aggregator;
//! catalog, users and sessions are thin query layers over their tables.

pub mod catalog;
pub mod list;
pub mod sessions;
pub mod users;
