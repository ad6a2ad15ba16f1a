//! Top-level error for a pipeline run.

use thiserror::Error;

use crate::config::{
    ConfigError,
    MatcherError,
};
use crate::input::document::DocumentError;
use crate::input::table::TableError;
use crate::translate::TranslateError;

/// Any failure that aborts a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}
