//! Пример: обход чанков WAV файла через RiffReader
//!
//! Демонстрирует:
//! - валидацию сигнатур RIFF/WAVE при открытии
//! - перечисление заголовков чанков без чтения аудиоданных
//! - разбор чанка wamd с диагностикой восстановленных нарушений

use std::{fs::File, io::BufReader};

use wamd_core::{decode_payload_with, DecodeOptions, RiffReader, WAMD_CHUNK_ID};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = std::env::args()
        .nth(1)
        .ok_or("usage: list_chunks <wav_file>")?;

    // --- RiffReader проверяет сигнатуры при открытии ---
    let file = BufReader::new(File::open(&input_path)?);
    let mut riff = match RiffReader::new(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ Not a WAV file: {e}");
            return Err(Box::new(e));
        }
    };

    println!("Chunks in {input_path}:");
    while let Some(header) = riff.next_header()? {
        println!("  '{}' {:>10} bytes", header.id_lossy(), header.size);

        if header.id != WAMD_CHUNK_ID {
            riff.skip_payload(&header)?;
            continue;
        }

        // --- wamd: печатаем поля и нарушения ---
        let payload = riff.read_payload(&header)?;
        let outcome = decode_payload_with(&payload, DecodeOptions::default())?;

        for (name, value) in &outcome.record {
            println!("      {name:<14}: {value}");
        }
        for issue in &outcome.issues {
            println!("      ✗ {issue}");
        }

        riff.skip_padding(&header)?;
    }

    println!("\n✓ {} chunks", riff.chunks_seen());

    Ok(())
}
