use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Ошибка чтения файла или вывода отчёта
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка разбора WAV / wamd
    #[error("wamd error: {0}")]
    Wamd(#[from] wamd_core::WamdError),

    /// Ошибка сериализации JSON отчёта
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
