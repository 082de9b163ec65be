use std::borrow::Cow;

/// Идентификатор записи в чанке wamd.
///
/// Закрытый набор известных тегов; всё остальное сохраняется как
/// [`Tag::Unknown`] и не отбрасывается.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Модель регистратора
    Model,
    /// Серийный номер
    Serial,
    /// Версия прошивки
    Firmware,
    /// Префикс имени файла
    Prefix,
    /// Время начала записи (ISO-8601 со смещением)
    Timestamp,
    /// Версия ПО конфигурации
    Software,
    /// Тип микрофона
    Mic,
    /// Чувствительность микрофона
    Sensitivity,
    /// NMEA-подобная строка координат
    Gps,
    /// Температура при записи
    Temperature,
    /// Тег, которого нет в таблице
    Unknown(u8),
}

impl Tag {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0x01 => Tag::Model,
            0x02 => Tag::Serial,
            0x03 => Tag::Firmware,
            0x04 => Tag::Prefix,
            0x05 => Tag::Timestamp,
            0x10 => Tag::Software,
            0x12 => Tag::Mic,
            0x13 => Tag::Sensitivity,
            0x14 => Tag::Gps,
            0x15 => Tag::Temperature,
            other => Tag::Unknown(other),
        }
    }

    /// Имя поля в [`crate::MetadataRecord`]; для неизвестных тегов
    /// `unknown_<hex>`.
    pub fn field_name(&self) -> Cow<'static, str> {
        match self {
            Tag::Model => Cow::Borrowed(FIELD_MODEL),
            Tag::Serial => Cow::Borrowed(FIELD_SERIAL),
            Tag::Firmware => Cow::Borrowed(FIELD_FIRMWARE),
            Tag::Prefix => Cow::Borrowed("prefix"),
            Tag::Timestamp => Cow::Borrowed(FIELD_TIMESTAMP),
            Tag::Software => Cow::Borrowed("software"),
            Tag::Mic => Cow::Borrowed("mic"),
            Tag::Sensitivity => Cow::Borrowed("sensitivity"),
            Tag::Gps => Cow::Borrowed(FIELD_GPS),
            Tag::Temperature => Cow::Borrowed(FIELD_TEMPERATURE),
            Tag::Unknown(v) => Cow::Owned(format!("unknown_{v:02x}")),
        }
    }
}

pub const FIELD_MODEL: &str = "model";
pub const FIELD_SERIAL: &str = "serial";
pub const FIELD_FIRMWARE: &str = "firmware";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_GPS: &str = "gps";
pub const FIELD_TEMPERATURE: &str = "temperature";

// Производные поля, добавляются после разбора всех записей
pub const FIELD_DATETIME: &str = "datetime";
pub const FIELD_LATITUDE: &str = "latitude";
pub const FIELD_LONGITUDE: &str = "longitude";
pub const FIELD_LATITUDE_DIR: &str = "latitude_dir";
pub const FIELD_LONGITUDE_DIR: &str = "longitude_dir";
