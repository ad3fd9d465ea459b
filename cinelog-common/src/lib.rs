//! # Cinelog Common Library
//!
//! Shared code for the cinelog movie catalog:
//! - Database schema, models and settings access
//! - Password hashing and session token generation
//! - Configuration loading
//! - Common error type

pub mod auth;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
