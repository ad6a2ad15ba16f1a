//! locale-sync
//!
//! Propagates translations from a CSV table into brand/locale JSON documents and strips
//! entries that a brand's base documents already provide.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod flat;
pub mod input;
pub mod locale;
pub mod logging;
pub mod normalise;
pub mod translate;

pub use error::Error;
