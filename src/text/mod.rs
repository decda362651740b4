// src/text/mod.rs
pub mod lines;
pub mod string;
pub mod utf8;

pub use lines::LineList;
pub use string::{Str, StrBuf};
pub use utf8::Utf8Error;
