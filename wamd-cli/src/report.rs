use std::io::Write;

use wamd_core::{
    FieldValue, MetadataRecord, FIELD_DATETIME, FIELD_FIRMWARE, FIELD_LATITUDE,
    FIELD_LATITUDE_DIR, FIELD_LONGITUDE, FIELD_LONGITUDE_DIR, FIELD_MODEL, FIELD_SERIAL,
    FIELD_TEMPERATURE,
};

use crate::{CliResult, ReportFormat};

/// Сообщение, когда в файле нет чанка метаданных.
pub const NO_METADATA_MESSAGE: &str = "No metadata found in WAV file";

/// Заглушка для отсутствующих полей в сводке.
const MISSING: &str = "N/A";

/// Получатель результата извлечения.
// Реализации: [`TextReport`] (сводка + все поля), [`JsonReport`].
pub trait MetadataSink {
    /// Метаданные найдены и разобраны
    fn metadata(
        &mut self,
        meta: &MetadataRecord,
    ) -> CliResult<()>;

    /// В файле нет чанка метаданных
    fn no_metadata(&mut self) -> CliResult<()>;
}

/// Человекочитаемый отчёт: сводка ключевых полей, затем все поля по
/// алфавиту (кроме `datetime`, он уже в сводке).
pub struct TextReport<W: Write> {
    out: W,
}

/// JSON объект со всеми полями; `null`, если метаданных нет.
pub struct JsonReport<W: Write> {
    out: W,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Создаёт получателя для выбранного формата.
pub fn sink_for<'a, W: Write + 'a>(
    format: ReportFormat,
    out: W,
) -> Box<dyn MetadataSink + 'a> {
    match format {
        ReportFormat::Text => Box::new(TextReport::new(out)),
        ReportFormat::Json => Box::new(JsonReport::new(out)),
    }
}

fn field_or_missing(
    meta: &MetadataRecord,
    name: &str,
) -> String {
    meta.get(name)
        .map(FieldValue::to_string)
        .unwrap_or_else(|| MISSING.to_string())
}

////////////////////////////////////////////////////////////////////////////////
// Реализации MetadataSink
////////////////////////////////////////////////////////////////////////////////

impl<W: Write> MetadataSink for TextReport<W> {
    fn metadata(
        &mut self,
        meta: &MetadataRecord,
    ) -> CliResult<()> {
        let out = &mut self.out;

        writeln!(out, "Metadata extracted:")?;
        writeln!(out, "  Model: {}", field_or_missing(meta, FIELD_MODEL))?;
        writeln!(out, "  Serial: {}", field_or_missing(meta, FIELD_SERIAL))?;
        writeln!(out, "  Firmware: {}", field_or_missing(meta, FIELD_FIRMWARE))?;
        writeln!(out, "  DateTime: {}", field_or_missing(meta, FIELD_DATETIME))?;
        writeln!(
            out,
            "  Latitude: {} {}",
            field_or_missing(meta, FIELD_LATITUDE),
            meta.text(FIELD_LATITUDE_DIR).unwrap_or_default()
        )?;
        writeln!(
            out,
            "  Longitude: {} {}",
            field_or_missing(meta, FIELD_LONGITUDE),
            meta.text(FIELD_LONGITUDE_DIR).unwrap_or_default()
        )?;
        writeln!(
            out,
            "  Temperature: {}",
            field_or_missing(meta, FIELD_TEMPERATURE)
        )?;

        writeln!(out, "\nAll fields:")?;
        for (name, value) in meta.iter().filter(|(name, _)| *name != FIELD_DATETIME) {
            writeln!(out, "  {name}: {value}")?;
        }

        out.flush()?;
        Ok(())
    }

    fn no_metadata(&mut self) -> CliResult<()> {
        writeln!(self.out, "{NO_METADATA_MESSAGE}")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> MetadataSink for JsonReport<W> {
    fn metadata(
        &mut self,
        meta: &MetadataRecord,
    ) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut self.out, meta)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn no_metadata(&mut self) -> CliResult<()> {
        writeln!(self.out, "null")?;
        self.out.flush()?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use wamd_core::parse_timestamp;

    use super::*;

    fn sample() -> MetadataRecord {
        let mut meta = MetadataRecord::new();
        meta.insert("model", "Song Meter 4");
        meta.insert("serial", "S4U01234");
        meta.insert("gps", "WGS84,41.1234,N,88.5678,W");
        meta.insert("latitude", 41.1234);
        meta.insert("latitude_dir", "N");
        meta.insert("longitude", 88.5678);
        meta.insert("longitude_dir", "W");
        meta.insert("timestamp", "2025-02-20 17:00:00-06:00");
        meta.insert(
            "datetime",
            parse_timestamp("2025-02-20 17:00:00-06:00").unwrap(),
        );
        meta
    }

    fn render(meta: &MetadataRecord) -> String {
        let mut report = TextReport::new(Vec::new());
        report.metadata(meta).unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn test_text_report_layout() {
        let expected = "\
Metadata extracted:
  Model: Song Meter 4
  Serial: S4U01234
  Firmware: N/A
  DateTime: 2025-02-20 17:00:00-06:00
  Latitude: 41.1234 N
  Longitude: 88.5678 W
  Temperature: N/A

All fields:
  gps: WGS84,41.1234,N,88.5678,W
  latitude: 41.1234
  latitude_dir: N
  longitude: 88.5678
  longitude_dir: W
  model: Song Meter 4
  serial: S4U01234
  timestamp: 2025-02-20 17:00:00-06:00
";
        assert_eq!(render(&sample()), expected);
    }

    #[test]
    fn test_text_report_missing_coordinates() {
        let mut meta = MetadataRecord::new();
        meta.insert("model", "SM Mini");

        let text = render(&meta);
        assert!(text.contains("  Latitude: N/A \n"));
        assert!(text.contains("  Longitude: N/A \n"));
        assert!(text.contains("  DateTime: N/A\n"));
    }

    #[test]
    fn test_text_no_metadata() {
        let mut report = TextReport::new(Vec::new());
        report.no_metadata().unwrap();

        assert_eq!(
            String::from_utf8(report.into_inner()).unwrap(),
            "No metadata found in WAV file\n"
        );
    }

    #[test]
    fn test_json_report() {
        let mut report = JsonReport::new(Vec::new());
        report.metadata(&sample()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&report.into_inner()).unwrap();
        assert_eq!(value["model"], "Song Meter 4");
        assert_eq!(value["latitude"], 41.1234);
        assert_eq!(value["datetime"], "2025-02-20T17:00:00-06:00");
    }

    #[test]
    fn test_json_no_metadata() {
        let mut report = JsonReport::new(Vec::new());
        report.no_metadata().unwrap();

        assert_eq!(report.into_inner(), b"null\n");
    }
}
