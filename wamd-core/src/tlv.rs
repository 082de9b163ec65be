//! Поток TLV записей внутри чанка wamd.
//!
//! Формат записи (little-endian):
//! ```text
//! [0]     TAG        u8   — идентификатор поля
//! [1]     RESERVED   u8   — не интерпретируется
//! [2..6]  LENGTH     u32  — длина значения
//! [6..]   VALUE      [u8] — LENGTH байт
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::{DecodeIssue, Tag};

/// Размер заголовка записи (tag + reserved + length)
pub const TAG_HEADER_SIZE: usize = 6;

/// Одна запись, ссылающаяся на байты payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRecord<'a> {
    /// Сырой идентификатор
    pub tag_id: u8,
    /// Смещение значения от начала payload
    pub offset: usize,
    /// Байты значения
    pub value: &'a [u8],
}

impl<'a> TagRecord<'a> {
    pub fn tag(&self) -> Tag {
        Tag::from_u8(self.tag_id)
    }

    /// Значение как UTF-8 текст без завершающих NUL.
    pub fn text(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value)
            .ok()
            .map(|s| s.trim_end_matches('\0'))
    }
}

/// Итератор по записям payload.
///
/// Останавливается, когда до конца остаётся меньше [`TAG_HEADER_SIZE`] байт,
/// или на записи, значение которой выходит за конец payload. Во втором случае
/// причина доступна через [`TagRecords::truncation`].
pub struct TagRecords<'a> {
    buf: &'a [u8],
    off: usize,
    truncation: Option<DecodeIssue>,
}

impl<'a> TagRecords<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            off: 0,
            truncation: None,
        }
    }

    /// Усечённая запись, на которой остановился обход.
    pub fn truncation(&self) -> Option<&DecodeIssue> {
        self.truncation.as_ref()
    }
}

impl<'a> Iterator for TagRecords<'a> {
    type Item = TagRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.truncation.is_some() || self.buf.len() - self.off < TAG_HEADER_SIZE {
            return None;
        }

        let tag_id = self.buf[self.off];
        let declared = LittleEndian::read_u32(&self.buf[self.off + 2..self.off + 6]);
        let start = self.off + TAG_HEADER_SIZE;
        let available = self.buf.len() - start;

        if declared as usize > available {
            self.truncation = Some(DecodeIssue::TruncatedRecord {
                tag: tag_id,
                offset: self.off,
                declared,
                available,
            });
            self.off = self.buf.len();
            return None;
        }

        let end = start + declared as usize;
        self.off = end;

        Some(TagRecord {
            tag_id,
            offset: start,
            value: &self.buf[start..end],
        })
    }
}
