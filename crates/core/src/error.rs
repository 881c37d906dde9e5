#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read findings file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write report file: {0}")]
    FileWrite(std::io::Error),

    #[error("findings error: {0}")]
    Findings(#[from] findings::FindingsError),
    #[error("asset error: {0}")]
    Files(#[from] oral_files::FilesError),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
