//! Обход RIFF/WAVE контейнера.
//!
//! ```text
//! [0..4]   "RIFF"
//! [4..8]   размер файла - 8 (u32 LE, не проверяется)
//! [8..12]  "WAVE"
//! [12..]   чанки: id (4 байта) + size (u32 LE) + payload (+1 байт паддинга,
//!          если size нечётный)
//! ```

use std::io::{self, ErrorKind, Read};

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::{WamdError, WamdResult};

/// Сигнатура контейнера: b"RIFF"
pub const RIFF_MAGIC: [u8; 4] = *b"RIFF";

/// Тип формы WAV: b"WAVE"
pub const WAVE_FORM: [u8; 4] = *b"WAVE";

/// Чанк с метаданными регистратора: b"wamd"
pub const WAMD_CHUNK_ID: [u8; 4] = *b"wamd";

/// Размер заголовка RIFF (сигнатура + размер + тип формы)
pub const RIFF_HEADER_SIZE: usize = 12;

/// Размер заголовка чанка (id + size)
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Заголовок чанка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Четырёхсимвольный идентификатор
    pub id: [u8; 4],
    /// Заявленный размер полезной нагрузки в байтах
    pub size: u32,
}

impl ChunkHeader {
    pub fn deserialize(buf: &[u8; CHUNK_HEADER_SIZE]) -> Self {
        let mut id = [0u8; 4];
        id.copy_from_slice(&buf[0..4]);
        let size = LittleEndian::read_u32(&buf[4..8]);

        ChunkHeader { id, size }
    }

    /// Идентификатор в печатном виде (непечатные байты заменяются).
    pub fn id_lossy(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }

    /// Паддинг до чётной границы после payload.
    pub fn padding(&self) -> u64 {
        u64::from(self.size % 2)
    }
}

/// Последовательный читатель чанков RIFF/WAVE.
///
/// Работает с любым [`Read`]: файлом, `Cursor<Vec<u8>>`, stdin. Чанки, которые
/// не нужны вызывающему, пропускаются без буферизации.
pub struct RiffReader<R: Read> {
    reader: R,
    chunks_seen: u64,
}

impl<R: Read> RiffReader<R> {
    /// Создаёт читатель, проверяя сигнатуры `RIFF` и `WAVE`.
    pub fn new(mut reader: R) -> WamdResult<Self> {
        let mut buf = [0u8; RIFF_HEADER_SIZE];
        let n = read_up_to(&mut reader, &mut buf)?;

        if n < RIFF_HEADER_SIZE {
            return Err(WamdError::invalid_riff(format!(
                "stream too short for RIFF header: {n} < {RIFF_HEADER_SIZE} bytes"
            )));
        }

        if buf[0..4] != RIFF_MAGIC {
            return Err(WamdError::invalid_riff("missing RIFF signature"));
        }

        if buf[8..12] != WAVE_FORM {
            return Err(WamdError::invalid_riff("missing WAVE form type"));
        }

        Ok(Self {
            reader,
            chunks_seen: 0,
        })
    }

    /// Читает следующий заголовок чанка или `None` на конце потока.
    ///
    /// Неполный заголовок (меньше 8 байт) тоже считается концом потока.
    pub fn next_header(&mut self) -> WamdResult<Option<ChunkHeader>> {
        let mut buf = [0u8; CHUNK_HEADER_SIZE];
        let n = read_up_to(&mut self.reader, &mut buf)?;

        if n < CHUNK_HEADER_SIZE {
            return Ok(None);
        }

        let header = ChunkHeader::deserialize(&buf);
        self.chunks_seen += 1;

        debug!(
            "chunk #{} '{}' size={}",
            self.chunks_seen,
            header.id_lossy(),
            header.size
        );

        Ok(Some(header))
    }

    /// Читает payload чанка. На конце потока возвращает столько байт, сколько
    /// удалось прочитать.
    pub fn read_payload(
        &mut self,
        header: &ChunkHeader,
    ) -> WamdResult<Vec<u8>> {
        let mut payload = Vec::new();
        (&mut self.reader)
            .take(u64::from(header.size))
            .read_to_end(&mut payload)?;

        if payload.len() < header.size as usize {
            debug!(
                "chunk '{}' truncated: {} of {} bytes",
                header.id_lossy(),
                payload.len(),
                header.size
            );
        }

        Ok(payload)
    }

    /// Пропускает payload чанка вместе с байтом паддинга.
    pub fn skip_payload(
        &mut self,
        header: &ChunkHeader,
    ) -> WamdResult<()> {
        let len = u64::from(header.size) + header.padding();
        io::copy(&mut (&mut self.reader).take(len), &mut io::sink())?;

        Ok(())
    }

    /// Пропускает байт паддинга после прочитанного [`Self::read_payload`].
    pub fn skip_padding(
        &mut self,
        header: &ChunkHeader,
    ) -> WamdResult<()> {
        io::copy(&mut (&mut self.reader).take(header.padding()), &mut io::sink())?;

        Ok(())
    }

    /// Ищет первый чанк с идентификатором `id` и возвращает его payload.
    ///
    /// `None`, если поток закончился раньше. Чанки после найденного не
    /// читаются. Если задан `max_size` и заявленный размер найденного чанка
    /// больше него, payload не читается и возвращается
    /// [`WamdError::PayloadTooLarge`].
    pub fn find_chunk(
        &mut self,
        id: [u8; 4],
        max_size: Option<u32>,
    ) -> WamdResult<Option<Vec<u8>>> {
        while let Some(header) = self.next_header()? {
            if header.id != id {
                self.skip_payload(&header)?;
                continue;
            }

            if let Some(limit) = max_size {
                if header.size > limit {
                    return Err(WamdError::PayloadTooLarge {
                        declared: header.size,
                        limit,
                    });
                }
            }

            return self.read_payload(&header).map(Some);
        }

        Ok(None)
    }

    /// Количество прочитанных заголовков чанков.
    pub fn chunks_seen(&self) -> u64 {
        self.chunks_seen
    }
}

/// Читает до заполнения `buf` или конца потока; возвращает число байт.
fn read_up_to<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn chunk(
        id: &[u8; 4],
        payload: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(id);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    fn riff(chunks: &[Vec<u8>]) -> Vec<u8> {
        let body = chunks.concat();

        let mut out = Vec::new();
        out.extend_from_slice(&RIFF_MAGIC);
        out.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
        out.extend_from_slice(&WAVE_FORM);
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn test_rejects_missing_riff_magic() {
        let mut bytes = riff(&[chunk(b"wamd", b"x")]);
        bytes[0..4].copy_from_slice(b"RIFX");

        let err = RiffReader::new(Cursor::new(bytes)).err().unwrap();
        assert!(err.to_string().contains("RIFF signature"));
    }

    #[test]
    fn test_rejects_missing_wave_form() {
        let mut bytes = riff(&[]);
        bytes[8..12].copy_from_slice(b"AVI ");

        let err = RiffReader::new(Cursor::new(bytes)).err().unwrap();
        assert!(matches!(err, WamdError::InvalidRiff(_)));
        assert!(err.to_string().contains("WAVE"));
    }

    #[test]
    fn test_rejects_short_stream() {
        let result = RiffReader::new(Cursor::new(b"RIFF\x04\x00".to_vec()));
        assert!(matches!(result, Err(WamdError::InvalidRiff(_))));
    }

    #[test]
    fn test_find_chunk_after_others() {
        let bytes = riff(&[chunk(b"fmt ", &[0u8; 16]), chunk(b"wamd", b"payload!")]);
        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();

        let payload = reader.find_chunk(WAMD_CHUNK_ID, None).unwrap();
        assert_eq!(payload.as_deref(), Some(&b"payload!"[..]));
        assert_eq!(reader.chunks_seen(), 2);
    }

    #[test]
    fn test_find_chunk_not_found() {
        let bytes = riff(&[chunk(b"fmt ", &[0u8; 16]), chunk(b"data", &[1u8; 8])]);
        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();

        assert!(reader.find_chunk(WAMD_CHUNK_ID, None).unwrap().is_none());
    }

    #[test]
    fn test_odd_chunk_pad_byte_skipped() {
        // 3-байтовый чанк + 1 байт паддинга, затем wamd
        let bytes = riff(&[chunk(b"LIST", b"abc"), chunk(b"wamd", b"ok")]);
        assert_eq!(bytes[12 + 8 + 3], 0, "pad byte present");

        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(
            reader.find_chunk(WAMD_CHUNK_ID, None).unwrap().as_deref(),
            Some(&b"ok"[..])
        );
    }

    #[test]
    fn test_first_match_wins() {
        let bytes = riff(&[chunk(b"wamd", b"first"), chunk(b"wamd", b"second")]);
        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();

        assert_eq!(
            reader.find_chunk(WAMD_CHUNK_ID, None).unwrap().as_deref(),
            Some(&b"first"[..])
        );
    }

    #[test]
    fn test_truncated_payload_tolerated() {
        let mut bytes = riff(&[]);
        bytes.extend_from_slice(b"wamd");
        bytes.extend_from_slice(&100u32.to_le_bytes());
        bytes.extend_from_slice(b"short");

        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(
            reader.find_chunk(WAMD_CHUNK_ID, None).unwrap().as_deref(),
            Some(&b"short"[..])
        );
    }

    #[test]
    fn test_oversized_other_chunk_ends_scan() {
        let mut bytes = riff(&[]);
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 10]);

        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.find_chunk(WAMD_CHUNK_ID, None).unwrap().is_none());
    }

    #[test]
    fn test_partial_chunk_header_is_end_of_stream() {
        let mut bytes = riff(&[]);
        bytes.extend_from_slice(b"wam");

        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.next_header().unwrap().is_none());
    }

    #[test]
    fn test_chunk_header_layout() {
        let header = ChunkHeader::deserialize(b"wamd\x05\x01\x00\x00");
        assert_eq!(header.id, WAMD_CHUNK_ID);
        assert_eq!(header.size, 0x0105);
        assert_eq!(header.padding(), 1);
        assert_eq!(header.id_lossy(), "wamd");
    }

    #[test]
    fn test_walk_all_chunks_after_reading_odd_payload() {
        let bytes = riff(&[chunk(b"wamd", b"odd"), chunk(b"data", b"pcm!")]);
        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();

        let header = reader.next_header().unwrap().unwrap();
        assert_eq!(reader.read_payload(&header).unwrap(), b"odd");
        reader.skip_padding(&header).unwrap();

        let next = reader.next_header().unwrap().unwrap();
        assert_eq!(next.id, *b"data");
        assert_eq!(next.size, 4);
    }

    #[test]
    fn test_find_chunk_size_limit() {
        let bytes = riff(&[chunk(b"fmt ", &[0u8; 16]), chunk(b"wamd", &[0u8; 64])]);

        let mut reader = RiffReader::new(Cursor::new(bytes.clone())).unwrap();
        let err = reader.find_chunk(WAMD_CHUNK_ID, Some(32)).unwrap_err();
        assert!(matches!(
            err,
            WamdError::PayloadTooLarge {
                declared: 64,
                limit: 32
            }
        ));

        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();
        let payload = reader.find_chunk(WAMD_CHUNK_ID, Some(64)).unwrap();
        assert_eq!(payload.map(|p| p.len()), Some(64));
    }

    #[test]
    fn test_size_limit_ignores_other_chunks() {
        let bytes = riff(&[chunk(b"data", &[0u8; 100]), chunk(b"wamd", b"ok")]);
        let mut reader = RiffReader::new(Cursor::new(bytes)).unwrap();

        assert_eq!(
            reader.find_chunk(WAMD_CHUNK_ID, Some(8)).unwrap().as_deref(),
            Some(&b"ok"[..])
        );
    }
}
