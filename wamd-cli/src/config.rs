use std::path::PathBuf;

use wamd_core::{DecodeOptions, ExtractConfig, LongitudeConvention, WAMD_CHUNK_ID};

/// Формат вывода отчёта.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Человекочитаемый отчёт
    #[default]
    Text,
    /// Один JSON объект
    Json,
}

/// Полная конфигурация запуска.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Путь к WAV файлу
    pub input_path: PathBuf,
    /// Формат вывода
    pub format: ReportFormat,
    /// Параметры извлечения
    pub extract: ExtractConfig,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl ReportConfig {
    pub fn new(input_path: PathBuf) -> Self {
        Self {
            input_path,
            format: ReportFormat::Text,
            extract: ExtractConfig::default(),
        }
    }

    pub fn with_longitude(
        mut self,
        convention: LongitudeConvention,
    ) -> Self {
        self.extract.decode = DecodeOptions {
            longitude: convention,
        };
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для ReportFormat
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for ReportFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: '{s}'. Use: text, json")),
        }
    }
}

/// Парсит идентификатор чанка: ровно 4 ASCII символа.
///
/// # Примеры
/// ```
/// use wamd_cli::config::parse_chunk_id;
/// assert_eq!(parse_chunk_id("wamd").unwrap(), *b"wamd");
/// assert_eq!(parse_chunk_id("fmt ").unwrap(), *b"fmt ");
/// assert!(parse_chunk_id("toolong").is_err());
/// ```
pub fn parse_chunk_id(s: &str) -> Result<[u8; 4], String> {
    if !s.is_ascii() {
        return Err(format!("Chunk id '{s}' must be ASCII"));
    }

    s.as_bytes()
        .try_into()
        .map_err(|_| format!("Chunk id '{s}' must be exactly 4 characters"))
}

/// Идентификатор по умолчанию в печатном виде (для `--help`).
pub fn default_chunk_id() -> String {
    String::from_utf8_lossy(&WAMD_CHUNK_ID).into_owned()
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_fromstr() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("yaml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_parse_chunk_id() {
        assert_eq!(parse_chunk_id("WAMD").unwrap(), *b"WAMD");
        assert!(parse_chunk_id("wam").is_err());
        assert!(parse_chunk_id("wamdx").is_err());
        assert!(parse_chunk_id("wäm").is_err());
        assert_eq!(default_chunk_id(), "wamd");
    }

    #[test]
    fn test_config_defaults() {
        let config = ReportConfig::new(PathBuf::from("a.wav"))
            .with_longitude(LongitudeConvention::Geographic);

        assert_eq!(config.format, ReportFormat::Text);
        assert_eq!(config.extract.chunk_id, WAMD_CHUNK_ID);
        assert_eq!(
            config.extract.decode.longitude,
            LongitudeConvention::Geographic
        );
    }
}
