mod sidecar;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use screenmark_pipeline::{ParseConfig, Pipeline};
use screenmark_renderer::{OverlayRenderer, OverlayStyle};
use screenmark_types::Screen;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::sidecar::{SidecarDetector, SidecarOcr};

/// Merge icon-detector and OCR dumps for a screenshot into one indexed
/// element list, optionally rendering the annotated overlay.
#[derive(Parser)]
#[command(name = "screenmark", version)]
struct Cli {
    /// Screenshot to parse
    #[arg(value_name = "IMAGE")]
    input: PathBuf,

    /// Icon detection dump (JSON detection set)
    #[arg(long, value_name = "FILE")]
    icons: PathBuf,

    /// OCR dump (JSON detection set)
    #[arg(long, value_name = "FILE")]
    ocr: PathBuf,

    /// Overlap at or above which a detector box absorbs an OCR box
    #[arg(long, default_value_t = 0.7)]
    iou_threshold: f32,

    /// Emit pixel xyxy coordinates instead of ratio-normalized ones
    #[arg(long, default_value_t = false)]
    pixel_coords: bool,

    /// Annotated overlay image to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Merged element list to write
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let cli = Cli::parse();
    let screen = Screen::open(&cli.input)?;

    let config = ParseConfig {
        iou_threshold: cli.iou_threshold,
        coords_in_ratio: !cli.pixel_coords,
        // Captioning needs a live model; dumps cannot provide it.
        caption_icons: false,
        ..Default::default()
    };
    let pipeline = Pipeline::new(
        Arc::new(SidecarDetector::new(&cli.icons)),
        Arc::new(SidecarOcr::new(&cli.ocr)),
        config,
    );

    let parsed = pipeline.parse(&screen).await?;

    for (index, element) in parsed.elements.iter().enumerate() {
        println!(
            "[{index}] {} {}",
            element.source,
            element.content.as_deref().unwrap_or("<uncaptioned>")
        );
    }

    if let Some(path) = &cli.json {
        std::fs::write(path, serde_json::to_string_pretty(&parsed)?)?;
        tracing::info!(path = %path.display(), "wrote element list");
    }

    if let Some(path) = &cli.output {
        let style = OverlayStyle::scaled_to(screen.width, screen.height);
        let canvas = OverlayRenderer::new().annotate(&screen.image, &parsed.elements, &style);
        image::DynamicImage::ImageRgba8(canvas).save(path)?;
        tracing::info!(path = %path.display(), "wrote annotated overlay");
    }

    Ok(())
}
