use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use log::{debug, info};

use crate::{
    decode::{decode_payload_with, DecodeOptions, DecodeOutcome},
    riff::{RiffReader, WAMD_CHUNK_ID},
    MetadataRecord, WamdResult,
};

/// Параметры извлечения метаданных.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Идентификатор чанка с метаданными
    pub chunk_id: [u8; 4],
    /// Лимит заявленного размера чанка (None = без ограничения)
    pub max_payload_bytes: Option<u32>,
    /// Параметры разбора payload
    pub decode: DecodeOptions,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            chunk_id: WAMD_CHUNK_ID,
            max_payload_bytes: None,
            decode: DecodeOptions::default(),
        }
    }
}

/// Извлекает метаданные из WAV потока с параметрами по умолчанию.
///
/// `Ok(None)`, если чанка `wamd` в файле нет.
pub fn extract_metadata<R: Read>(reader: R) -> WamdResult<Option<MetadataRecord>> {
    Ok(extract_with(reader, &ExtractConfig::default())?.map(|outcome| outcome.record))
}

/// Открывает файл и извлекает метаданные с параметрами по умолчанию.
pub fn extract_metadata_from_path<P: AsRef<Path>>(path: P) -> WamdResult<Option<MetadataRecord>> {
    Ok(extract_from_path_with(path, &ExtractConfig::default())?.map(|outcome| outcome.record))
}

/// Открывает файл и извлекает метаданные.
pub fn extract_from_path_with<P: AsRef<Path>>(
    path: P,
    config: &ExtractConfig,
) -> WamdResult<Option<DecodeOutcome>> {
    let path = path.as_ref();
    debug!("opening {}", path.display());

    let file = File::open(path)?;
    extract_with(BufReader::new(file), config)
}

/// Находит чанк метаданных и разбирает его.
pub fn extract_with<R: Read>(
    reader: R,
    config: &ExtractConfig,
) -> WamdResult<Option<DecodeOutcome>> {
    let mut riff = RiffReader::new(reader)?;
    let chunk_name = String::from_utf8_lossy(&config.chunk_id);

    let Some(payload) = riff.find_chunk(config.chunk_id, config.max_payload_bytes)? else {
        info!(
            "no '{chunk_name}' chunk among {} chunks",
            riff.chunks_seen()
        );
        return Ok(None);
    };

    let outcome = decode_payload_with(&payload, config.decode)?;

    info!(
        "'{chunk_name}' chunk: {} fields, {} issues",
        outcome.record.len(),
        outcome.issues.len()
    );

    Ok(Some(outcome))
}
