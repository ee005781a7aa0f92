//! CLI binary for txt2pdf.
//!
//! A thin shim over the library crate: `serve` runs the upload/download web
//! service, `convert` performs a one-shot file conversion. Flags map onto
//! [`GatewayConfig`] and [`ConversionConfig`].

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use txt2pdf::{
    convert, derive_output_name, AppState, ConversionConfig, EncodingPolicy, GatewayConfig,
};

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run the web service on the default port
  txt2pdf serve

  # Serve on all interfaces with custom directories
  txt2pdf serve --host 0.0.0.0 --port 8080 --upload-dir /tmp/in --output-dir /tmp/out

  # One-shot conversion (writes notes.pdf next to the input)
  txt2pdf convert notes.txt

  # Force an encoding and print stats as JSON
  txt2pdf convert --encoding windows-1252 --json legacy.txt -o legacy.pdf

ENVIRONMENT VARIABLES:
  TXT2PDF_HOST         Bind address for `serve`
  TXT2PDF_PORT         Port for `serve`
  TXT2PDF_UPLOAD_DIR   Staging directory for uploads
  TXT2PDF_OUTPUT_DIR   Directory for rendered PDFs
  TXT2PDF_ENCODING     Fixed encoding label for `convert`
"#;

/// Convert plain-text files to paginated PDF documents.
#[derive(Parser, Debug)]
#[command(
    name = "txt2pdf",
    version,
    about = "Convert plain-text files to paginated PDF documents",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "TXT2PDF_VERBOSE")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the upload/download web service.
    Serve {
        /// Bind address.
        #[arg(long, env = "TXT2PDF_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Bind port.
        #[arg(long, env = "TXT2PDF_PORT", default_value_t = 5000)]
        port: u16,

        /// Staging directory for raw uploads (created if absent).
        #[arg(long, env = "TXT2PDF_UPLOAD_DIR", default_value = "uploads")]
        upload_dir: PathBuf,

        /// Directory for rendered PDFs (created if absent).
        #[arg(long, env = "TXT2PDF_OUTPUT_DIR", default_value = "outputs")]
        output_dir: PathBuf,

        /// Maximum accepted upload size in bytes.
        #[arg(long, env = "TXT2PDF_MAX_UPLOAD", default_value_t = 16 * 1024 * 1024)]
        max_upload_bytes: usize,
    },

    /// Convert a single text file to PDF.
    Convert {
        /// Input text file.
        input: PathBuf,

        /// Output PDF path. Defaults to the input name with a `.pdf` suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Decode under this encoding label instead of detecting
        /// (e.g. utf-8, windows-1252).
        #[arg(long, env = "TXT2PDF_ENCODING")]
        encoding: Option<String>,

        /// Font size in points.
        #[arg(long, default_value_t = 12.0)]
        font_size: f32,

        /// Wrap column for long lines; 0 disables wrapping.
        #[arg(long, default_value_t = 90)]
        wrap: usize,

        /// Print the conversion stats as JSON to stdout.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve {
            host,
            port,
            upload_dir,
            output_dir,
            max_upload_bytes,
        } => {
            let gateway = GatewayConfig {
                upload_dir,
                output_dir,
                max_upload_bytes,
                ..GatewayConfig::default()
            };
            let state = AppState::new(gateway, ConversionConfig::default())
                .context("Failed to create upload/output directories")?;

            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("Invalid bind address '{host}:{port}'"))?;

            txt2pdf::serve(addr, state).await.context("Server failed")?;
        }

        Command::Convert {
            input,
            output,
            encoding,
            font_size,
            wrap,
            json,
        } => {
            let output = output.unwrap_or_else(|| {
                let name = input
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("document.txt");
                input.with_file_name(derive_output_name(name))
            });

            let mut builder = ConversionConfig::builder()
                .font_size_pt(font_size)
                .wrap_columns(if wrap == 0 { None } else { Some(wrap) });
            if let Some(label) = encoding {
                builder = builder.encoding(EncodingPolicy::Fixed(label));
            }
            let config = builder.build().context("Invalid configuration")?;

            let stats = convert(&input, &output, &config)
                .await
                .context("Conversion failed")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
                );
            } else {
                eprintln!(
                    "{} pages  {} lines  {}  {}ms  →  {}",
                    stats.page_count,
                    stats.line_count,
                    stats.encoding,
                    stats.duration_ms,
                    output.display(),
                );
            }
        }
    }

    Ok(())
}
