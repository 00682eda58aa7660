pub mod convert;
pub mod preamble;
