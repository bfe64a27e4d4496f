// src/lib.rs

#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;

pub mod file;
pub mod page;
pub mod progress;
pub mod runner;
pub mod session;
pub mod terms;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
