//! Runtime binding to the SR Research EDF access API.
//!
//! The proprietary decoder that parses EyeLink EDF files is an external
//! collaborator: this crate loads it dynamically, mirrors the handful of
//! C structs at its interface, and walks the element stream once per
//! file into the raw record triple the assembly pipeline consumes.

pub mod ffi;

mod error;
mod reader;

pub use error::EdfApiError;
pub use reader::{EdfApi, EdfFile, RawReadOptions, DEFAULT_LIBRARY, SAMPLE_COLUMNS};
