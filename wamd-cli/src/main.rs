use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use wamd_cli::{default_chunk_id, parse_chunk_id, run, ReportConfig, ReportFormat};
use wamd_core::LongitudeConvention;

#[derive(Parser, Debug)]
#[command(
    name = "wamd-extract",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract recorder metadata from the wamd chunk of a WAV file",
    long_about = None,
)]
struct Cli {
    /// Путь к WAV файлу
    wav_file: PathBuf,
    /// Формат вывода: text, json
    #[arg(short, long, default_value = "text")]
    format: String,
    /// Идентификатор чанка метаданных (4 символа)
    #[arg(long, default_value_t = default_chunk_id())]
    chunk_id: String,
    /// Отказаться от чанка больше указанного размера (байт)
    #[arg(long)]
    max_chunk_bytes: Option<u32>,
    /// Отрицательная долгота для W вместо E
    #[arg(long)]
    geographic_longitude: bool,
    /// Подробный лог (каждый чанк и тег)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Тихий режим (только ошибки)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = match (cli.verbose, cli.quiet) {
        (true, _) => log::LevelFilter::Debug,
        (_, true) => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let format: ReportFormat = match cli.format.parse() {
        Ok(f) => f,
        Err(e) => {
            error!("--format: {e}");
            std::process::exit(1);
        }
    };

    let chunk_id = match parse_chunk_id(&cli.chunk_id) {
        Ok(id) => id,
        Err(e) => {
            error!("--chunk-id: {e}");
            std::process::exit(1);
        }
    };

    let convention = if cli.geographic_longitude {
        LongitudeConvention::Geographic
    } else {
        LongitudeConvention::Vendor
    };

    let mut config = ReportConfig::new(cli.wav_file.clone()).with_longitude(convention);
    config.format = format;
    config.extract.chunk_id = chunk_id;
    config.extract.max_payload_bytes = cli.max_chunk_bytes;

    info!(
        "{:?}: chunk '{}', longitude {}",
        cli.wav_file, cli.chunk_id, convention
    );

    let stdout = std::io::stdout();

    if let Err(e) = run(&config, stdout.lock()) {
        error!("{:?}: {e}", cli.wav_file);
        std::process::exit(1);
    }
}
