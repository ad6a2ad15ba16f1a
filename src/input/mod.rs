//! Pipeline inputs: the translation table and the locale documents.

pub mod document;
pub mod table;
