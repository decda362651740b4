// src/error.rs
use thiserror::Error;

use crate::text::Utf8Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] Utf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
