use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, warn};

use crate::{
    DecodeIssue, FieldValue, MetadataRecord, TagRecords, WamdError, WamdResult, FIELD_DATETIME, FIELD_GPS,
    FIELD_LATITUDE, FIELD_LATITUDE_DIR, FIELD_LONGITUDE, FIELD_LONGITUDE_DIR, FIELD_TIMESTAMP,
};

/// Минимальное число частей GPS строки через запятую.
pub const GPS_MIN_PARTS: usize = 5;

/// Форматы `timestamp` со смещением. `%.f` допускает отсутствие дробной
/// части, `%#z` принимает `Z`, `±HH`, `±HHMM` и `±HH:MM`.
const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Форматы `timestamp` без смещения.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Только дата; время считается полночью.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Правило знака долготы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongitudeConvention {
    /// Как пишет регистратор: долгота отрицательная при `E`
    #[default]
    Vendor,
    /// Географическое: долгота отрицательная при `W`
    Geographic,
}

impl LongitudeConvention {
    fn negate(
        &self,
        dir: &str,
    ) -> bool {
        match self {
            LongitudeConvention::Vendor => dir == "E",
            LongitudeConvention::Geographic => dir == "W",
        }
    }
}

impl std::fmt::Display for LongitudeConvention {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            LongitudeConvention::Vendor => write!(f, "vendor"),
            LongitudeConvention::Geographic => write!(f, "geographic"),
        }
    }
}

/// Параметры разбора payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    pub longitude: LongitudeConvention,
}

/// Результат разбора: метаданные и восстановленные по ходу нарушения.
#[derive(Debug, Clone, Default)]
pub struct DecodeOutcome {
    pub record: MetadataRecord,
    pub issues: Vec<DecodeIssue>,
}

/// Разбирает payload чанка wamd с параметрами по умолчанию.
pub fn decode_payload(payload: &[u8]) -> WamdResult<MetadataRecord> {
    decode_payload_with(payload, DecodeOptions::default()).map(|outcome| outcome.record)
}

/// Разбирает payload чанка wamd.
///
/// Усечённая запись завершает разбор, не-UTF-8 значение пропускается; оба
/// случая попадают в [`DecodeOutcome::issues`]. Ошибка возвращается только
/// для неразбираемых `timestamp` и координат в `gps`.
pub fn decode_payload_with(
    payload: &[u8],
    options: DecodeOptions,
) -> WamdResult<DecodeOutcome> {
    let mut record = MetadataRecord::new();
    let mut issues = Vec::new();
    let mut records = TagRecords::new(payload);

    for rec in records.by_ref() {
        let Some(text) = rec.text() else {
            let issue = DecodeIssue::UndecodableValue {
                tag: rec.tag_id,
                offset: rec.offset,
                len: rec.value.len(),
            };
            warn!("{issue}");
            issues.push(issue);
            continue;
        };

        let name = rec.tag().field_name();
        debug!("tag 0x{:02x} -> {name} ({} bytes)", rec.tag_id, rec.value.len());
        record.insert(name, text);
    }

    if let Some(issue) = records.truncation() {
        warn!("{issue}");
        issues.push(issue.clone());
    }

    apply_gps(&mut record, options.longitude)?;
    apply_timestamp(&mut record)?;

    Ok(DecodeOutcome { record, issues })
}

/// Добавляет `latitude`, `longitude`, `latitude_dir`, `longitude_dir` из
/// поля `gps`, если в нём не меньше [`GPS_MIN_PARTS`] частей.
fn apply_gps(
    record: &mut MetadataRecord,
    convention: LongitudeConvention,
) -> WamdResult<()> {
    let Some(gps) = record.text(FIELD_GPS) else {
        return Ok(());
    };

    let parts: Vec<&str> = gps.split(',').collect();
    if parts.len() < GPS_MIN_PARTS {
        debug!("gps has {} parts, coordinates skipped", parts.len());
        return Ok(());
    }

    let lat_dir = parts[2].to_string();
    let lon_dir = parts[4].to_string();
    let mut lat = parse_magnitude("latitude", parts[1])?;
    let mut lon = parse_magnitude("longitude", parts[3])?;

    if lat_dir == "S" {
        lat = -lat;
    }
    if convention.negate(&lon_dir) {
        lon = -lon;
    }

    record.insert(FIELD_LATITUDE, lat);
    record.insert(FIELD_LONGITUDE, lon);
    record.insert(FIELD_LATITUDE_DIR, lat_dir);
    record.insert(FIELD_LONGITUDE_DIR, lon_dir);

    Ok(())
}

/// Модуль координаты; знак задаётся только буквой полушария.
fn parse_magnitude(
    axis: &'static str,
    s: &str,
) -> WamdResult<f64> {
    s.trim()
        .parse::<f64>()
        .map(f64::abs)
        .map_err(|_| WamdError::invalid_coordinate(axis, s))
}

/// Добавляет `datetime` из поля `timestamp`. Неразбираемое значение —
/// фатальная ошибка.
fn apply_timestamp(record: &mut MetadataRecord) -> WamdResult<()> {
    let Some(raw) = record.text(FIELD_TIMESTAMP) else {
        return Ok(());
    };

    let value = parse_timestamp(raw)?;
    record.insert(FIELD_DATETIME, value);

    Ok(())
}

/// Разбирает время вида `2025-02-20 17:00:00-06:00`.
///
/// Со смещением получается [`FieldValue::DateTime`], без смещения или
/// только с датой [`FieldValue::NaiveDateTime`]. Пробелы по краям
/// отбрасываются.
pub fn parse_timestamp(raw: &str) -> WamdResult<FieldValue> {
    let s = raw.trim();
    let zoned = |fmt: &str| DateTime::parse_from_str(s, fmt).map(FieldValue::from);
    let naive = |fmt: &str| NaiveDateTime::parse_from_str(s, fmt).map(FieldValue::from);

    let first = match zoned(ZONED_FORMATS[0]) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    zoned(ZONED_FORMATS[1])
        .or_else(|_| naive(NAIVE_FORMATS[0]))
        .or_else(|_| naive(NAIVE_FORMATS[1]))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(|date| FieldValue::from(NaiveDateTime::from(date)))
        })
        .map_err(|_| WamdError::TimestampParse {
            value: raw.to_string(),
            source: first,
        })
}
