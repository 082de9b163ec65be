use thiserror::Error;

/// Результат для операций извлечения метаданных wamd
pub type WamdResult<T> = std::result::Result<T, WamdError>;

/// Фатальные ошибки: контейнер не WAV, поле времени или координаты не
/// разобрать, ошибки ввода/вывода.
///
/// Восстанавливаемые ситуации (усечённая запись, бинарное значение) сюда не
/// попадают, см. [`DecodeIssue`].
#[derive(Debug, Error)]
pub enum WamdError {
    /// Нет сигнатуры RIFF/WAVE в начале потока
    #[error("Invalid RIFF/WAVE container: {0}")]
    InvalidRiff(String),

    /// Поле `timestamp` не соответствует формату ISO-8601 со смещением
    #[error("Invalid timestamp '{value}': {source}")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Часть GPS строки не является числом
    #[error("Invalid {axis} coordinate '{value}' in gps field")]
    InvalidCoordinate { axis: &'static str, value: String },

    /// Заявленный размер чанка превышает установленный лимит
    #[error("Metadata chunk too large: declared {declared} bytes, limit {limit}")]
    PayloadTooLarge { declared: u32, limit: u32 },

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WamdError {
    /// Удобные конструкторы
    pub fn invalid_riff<S: Into<String>>(s: S) -> Self {
        Self::InvalidRiff(s.into())
    }

    pub fn invalid_coordinate<S: Into<String>>(
        axis: &'static str,
        value: S,
    ) -> Self {
        Self::InvalidCoordinate {
            axis,
            value: value.into(),
        }
    }
}

/// Восстанавливаемые нарушения внутри чанка wamd.
///
/// Декодер не прерывается на них: усечённая запись завершает разбор с
/// частичным результатом, бинарное значение просто пропускается.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeIssue {
    /// Значение записи выходит за конец полезной нагрузки
    #[error("Truncated record 0x{tag:02x} at offset {offset}: declared {declared} bytes, {available} available")]
    TruncatedRecord {
        tag: u8,
        offset: usize,
        declared: u32,
        available: usize,
    },

    /// Значение не является UTF-8 текстом
    #[error("Undecodable value for tag 0x{tag:02x} at offset {offset} ({len} bytes)")]
    UndecodableValue { tag: u8, offset: usize, len: usize },
}
