//! Command implementations for Kibrary CLI

pub mod add;
pub mod completions;
pub mod install;
pub mod list;
pub mod version;
