//! I/O helpers for deploy commands.

pub mod acknowledge;
pub mod clean;
pub mod config;
pub mod docs;
pub mod packager;
pub mod paths;
pub mod tree_copy;
