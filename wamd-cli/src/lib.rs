pub mod config;
pub mod error;
pub mod report;

use std::io::Write;

use log::{debug, warn};
use wamd_core::extract_from_path_with;

pub use config::*;
pub use error::*;
pub use report::*;

/// Извлекает метаданные из `config.input_path` и передаёт их в отчёт.
///
/// Возвращает `true`, если чанк метаданных найден. Восстановленные нарушения
/// декодирования пишутся в лог и на результат не влияют.
pub fn run<W: Write>(
    config: &ReportConfig,
    out: W,
) -> CliResult<bool> {
    debug!(
        "extracting '{}' from {} (format={})",
        String::from_utf8_lossy(&config.extract.chunk_id),
        config.input_path.display(),
        config.format
    );

    let outcome = extract_from_path_with(&config.input_path, &config.extract)?;
    let mut sink = sink_for(config.format, out);

    match outcome {
        Some(outcome) => {
            for issue in &outcome.issues {
                warn!("{}: {issue}", config.input_path.display());
            }
            sink.metadata(&outcome.record)?;
            Ok(true)
        }
        None => {
            sink.no_metadata()?;
            Ok(false)
        }
    }
}
