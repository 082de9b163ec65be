//! Извлечение метаданных регистраторов из чанка `wamd` WAV файлов.
//!
//! Чанк `wamd` содержит последовательность TLV записей: модель и серийный
//! номер устройства, прошивку, время записи, координаты GPS, температуру.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use wamd_core::extract_metadata_from_path;
//!
//! match extract_metadata_from_path("S4U01234_20250220_170000.wav")? {
//!     Some(meta) => {
//!         println!("model: {:?}", meta.text("model"));
//!         println!("recorded at: {:?}", meta.datetime());
//!     }
//!     None => println!("no wamd chunk"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod decode;
pub mod extract;
pub mod riff;
pub mod tlv;

pub use decode::*;
pub use extract::*;
pub use riff::*;
pub use tlv::*;
pub use wamd_types::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
