use std::collections::{btree_map, BTreeMap};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::{
    FieldValue, FIELD_DATETIME, FIELD_LATITUDE, FIELD_LATITUDE_DIR, FIELD_LONGITUDE,
    FIELD_LONGITUDE_DIR,
};

/// Метаданные одного WAV файла: имя поля → значение.
///
/// Поля хранятся в алфавитном порядке, повторная вставка перезаписывает
/// значение.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: BTreeMap<String, FieldValue>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Вставляет поле, возвращая предыдущее значение (если было).
    pub fn insert<K, V>(
        &mut self,
        name: K,
        value: V,
    ) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn float(
        &self,
        name: &str,
    ) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_float)
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.fields.contains_key(name)
    }

    /// Разобранное время записи (поле `datetime`), если в нём указано
    /// смещение. Время без смещения хранится как [`FieldValue::NaiveDateTime`].
    pub fn datetime(&self) -> Option<&DateTime<FixedOffset>> {
        self.get(FIELD_DATETIME).and_then(FieldValue::as_datetime)
    }

    /// Широта со знаком и буква полушария.
    pub fn latitude(&self) -> Option<(f64, &str)> {
        Some((
            self.float(FIELD_LATITUDE)?,
            self.text(FIELD_LATITUDE_DIR)?,
        ))
    }

    /// Долгота со знаком и буква полушария.
    pub fn longitude(&self) -> Option<(f64, &str)> {
        Some((
            self.float(FIELD_LONGITUDE)?,
            self.text(FIELD_LONGITUDE_DIR)?,
        ))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Поля в алфавитном порядке имён.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a MetadataRecord {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
