/// Errors that can occur while exporting a sequence
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from the spreadsheet library
    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    /// Vocabulary conversion failed
    #[error(transparent)]
    ConvertError(#[from] crate::convert::ConvertError),
}
