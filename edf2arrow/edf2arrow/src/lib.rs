mod assemble;
mod error;
mod messages;
mod options;
mod reader;

pub use assemble::{assemble_tables, EdfTables};
pub use edf2arrow_arrow as arrow;
pub use edf2arrow_core as core;
pub use edf2arrow_edfapi as edfapi;
pub use error::EdfReaderError;
pub use messages::{message_record, MessageFilter};
pub use options::ReadOptions;
pub use reader::EdfReader;
