use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use serde::Serialize;

/// Значение поля метаданных.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Текст записи как есть (без завершающих NUL)
    Text(String),
    /// Координата в градусах со знаком полушария
    Float(f64),
    /// Разобранное время записи со смещением от UTC
    DateTime(DateTime<FixedOffset>),
    /// Время записи без смещения (регистратор не указал часовой пояс)
    NaiveDateTime(NaiveDateTime),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_naive_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            FieldValue::NaiveDateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            // `{:?}` всегда печатает дробную часть: 41.0, а не 41
            FieldValue::Float(v) => write!(f, "{v:?}"),
            FieldValue::DateTime(dt) if dt.nanosecond() == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%:z"))
            }
            FieldValue::DateTime(dt) => {
                write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.6f%:z"))
            }
            FieldValue::NaiveDateTime(dt) if dt.nanosecond() == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
            }
            FieldValue::NaiveDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.6f")),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        FieldValue::DateTime(dt)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(dt: NaiveDateTime) -> Self {
        FieldValue::NaiveDateTime(dt)
    }
}
