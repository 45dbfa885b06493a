//! CLI command implementations

pub mod config;
pub mod filters;
pub mod nav;
pub mod search;
