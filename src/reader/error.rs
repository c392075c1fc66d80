/// Errors that can occur while reading a sequence file
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No configured encoding could decode the bytes
    #[error("Could not decode file with any of the encodings {}", format_attempts(.attempts))]
    Undecodable {
        /// `(encoding, reason)` for each attempt, in order
        attempts: Vec<(String, String)>,
    },

    /// The text decoded but is not a valid semicolon-delimited table
    #[error("Malformed sequence file {}", format_attempts(.attempts))]
    Malformed {
        /// `(encoding, reason)` for each encoding that decoded, in order
        attempts: Vec<(String, String)>,
    },

    /// An encoding label in the configuration is not recognised
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// The configuration lists no encodings at all
    #[error("No text encodings configured")]
    NoEncodings,
}

fn format_attempts(attempts: &[(String, String)]) -> String {
    attempts
        .iter()
        .map(|(encoding, reason)| format!("[{}: {}]", encoding, reason))
        .collect::<Vec<_>>()
        .join(", ")
}
