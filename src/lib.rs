// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod error;
pub mod file;
pub mod log;
pub mod normalize;
pub mod progress;
pub mod scrape;
pub mod token;

pub use error::{Result, ScrapeError};
pub use specs::{ActivityRecord, ItemId};
