//! Library components of the `plant-store` command.

pub mod commands;
pub mod logging;
pub mod summary;
