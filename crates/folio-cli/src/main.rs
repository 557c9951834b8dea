//! folio-photo: drive the photo capture pipeline from the command line.
//!
//! Reads PHOTO_* settings from the environment (or `.env`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use folio_capture::{CameraFacing, CameraModal, Frame, PhotoFieldController, StaticCameraProvider};
use folio_cli::{file_blob, frame_dimension, init_tracing, CaptureReport, LoggingForm};
use folio_core::constants::{DEFAULT_PHOTO_FIELD, DEFAULT_SNAPSHOT_MIME_TYPE};
use folio_core::CaptureConfig;
use folio_processing::MediaCodec;

#[derive(Parser)]
#[command(name = "folio-photo", about = "Photo capture pipeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the data URI of an image file
    Encode {
        /// Path to the image
        file: PathBuf,
    },
    /// Decode a data URI into a file
    Decode {
        /// The data URI, or @path to read it from a file
        data_uri: String,
        /// Output path
        #[arg(long)]
        out: PathBuf,
        /// File name given to the decoded blob
        #[arg(long)]
        name: Option<String>,
        /// MIME type given to the decoded blob
        #[arg(long, default_value = DEFAULT_SNAPSHOT_MIME_TYPE)]
        mime: String,
    },
    /// Select a file into a photo field and print the resulting state
    Capture {
        /// Path to the image
        file: PathBuf,
        /// Existing photo URL the field starts with
        #[arg(long, default_value = "")]
        initial: String,
        /// Reject files outside the configured types and size
        #[arg(long)]
        enforce: bool,
        /// Form field name
        #[arg(long, default_value = DEFAULT_PHOTO_FIELD)]
        field: String,
    },
    /// Take a snapshot from a synthetic camera and print the resulting state
    Snapshot {
        /// Frame width in pixels
        #[arg(long, default_value = "640", value_parser = frame_dimension())]
        width: u32,
        /// Frame height in pixels
        #[arg(long, default_value = "480", value_parser = frame_dimension())]
        height: u32,
        /// Use the rear camera
        #[arg(long)]
        rear: bool,
        /// Form field name
        #[arg(long, default_value = DEFAULT_PHOTO_FIELD)]
        field: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = CaptureConfig::from_env().context("Invalid PHOTO_* configuration")?;
    let codec = MediaCodec::new();

    match cli.command {
        Commands::Encode { file } => {
            let blob = file_blob(&file).await?;
            let data_uri = codec.blob_to_data_uri(&blob).await?;
            println!("{}", data_uri);
        }
        Commands::Decode {
            data_uri,
            out,
            name,
            mime,
        } => {
            let data_uri = match data_uri.strip_prefix('@') {
                Some(path) => tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read data URI from {}", path))?,
                None => data_uri,
            };
            let name = name.unwrap_or_else(|| config.snapshot_file_name.clone());
            let blob = codec.data_uri_to_blob(&data_uri, &name, &mime).await?;
            let data = blob.read_bytes().await?;
            tokio::fs::write(&out, &data)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "Wrote {} bytes ({}, {}) to {}",
                data.len(),
                blob.name,
                blob.mime_type,
                out.display()
            );
        }
        Commands::Capture {
            file,
            initial,
            enforce,
            field,
        } => {
            let config = CaptureConfig {
                enforce_constraints: config.enforce_constraints || enforce,
                ..config
            };
            let form = Arc::new(LoggingForm::default());
            let controller = PhotoFieldController::new(&field, config, form.clone());
            controller.mount(&initial).await;

            let blob = file_blob(&file).await?;
            let outcome = controller.on_file_selected(blob).await;
            print_report(&controller, Some(outcome), &form).await?;
            controller.unmount().await;
        }
        Commands::Snapshot {
            width,
            height,
            rear,
            field,
        } => {
            let facing = if rear {
                CameraFacing::Rear
            } else {
                CameraFacing::Front
            };
            let frame = Frame::solid(width, height, [96, 128, 160]);
            let provider = StaticCameraProvider::new().with_device(facing, Some(frame));

            let form = Arc::new(LoggingForm::default());
            let controller = PhotoFieldController::new(&field, config, form.clone());
            controller.mount("").await;

            let modal = CameraModal::new(controller.config());
            modal.open(&provider, facing).await;
            let outcome = modal.shoot(&controller).await;
            print_report(&controller, outcome, &form).await?;
            controller.unmount().await;
        }
    }

    Ok(())
}

async fn print_report(
    controller: &PhotoFieldController,
    outcome: Option<folio_capture::AcceptOutcome>,
    form: &LoggingForm,
) -> anyhow::Result<()> {
    let state = controller.state().await;
    let report = CaptureReport::new(controller.field_name(), outcome, &state, form.writes(), 96);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
