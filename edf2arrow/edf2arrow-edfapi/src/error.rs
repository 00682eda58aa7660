//! Error types for the native EDF API binding.

/// Errors produced while loading or driving the vendor library.
#[derive(Debug, thiserror::Error)]
pub enum EdfApiError {
    /// The shared library could not be loaded or a required symbol is
    /// missing.
    #[error("failed to load EDF API library '{library}': {source}")]
    Load {
        library: String,
        #[source]
        source: libloading::Error,
    },

    /// The file path contained an interior NUL and cannot cross the C
    /// boundary.
    #[error("path '{path}' is not a valid C string")]
    InvalidPath { path: String },

    /// `edf_open_file` refused the file.
    #[error("EDF API failed to open '{path}' (error code {code})")]
    Open { path: String, code: i32 },

    /// `edf_get_preamble_text` returned an error code.
    #[error("EDF API failed to read preamble (error code {code})")]
    Preamble { code: i32 },
}
