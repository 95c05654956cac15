//! Error types for bankweb-parser

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid JSON in {location}: {message}")]
    InvalidJson {
        location: String,
        message: String,
    },

    #[error("IO error")]
    IoError(#[from] io::Error),
}
