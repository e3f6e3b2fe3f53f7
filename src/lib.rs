#![forbid(unsafe_code)]

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod render;
pub mod walk;
pub mod week;
