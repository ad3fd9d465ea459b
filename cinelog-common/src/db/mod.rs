//! Database access layer shared across cinelog crates

pub mod init;
pub mod models;
pub mod settings;

pub use init::{init_database, init_schema};
pub use settings::{ensure_setting, get_setting, set_setting};
