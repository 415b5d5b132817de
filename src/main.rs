use std::io;
use std::path::PathBuf;

use cr2fits_rs::batch;
use cr2fits_rs::image_pipeline::{ConversionConfig, RawToFitsPipeline};
use cr2fits_rs::logger;

use tracing::info;

fn main() -> anyhow::Result<()> {
    logger::init();

    let directory = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    info!("Scanning {} for Canon raw frames...", directory.display());

    let config = ConversionConfig::builder().debayer(true).build();
    let pipeline = RawToFitsPipeline::new(config);

    info!("RAW to FITS pipeline initialized");
    info!(
        "Debayering: {}",
        if pipeline.config().debayer {
            "enabled"
        } else {
            "disabled"
        }
    );

    let mut stdout = io::stdout().lock();
    let summary = batch::convert_directory(&directory, &pipeline, &mut stdout)?;

    info!(
        "Converted {} file(s), {} failed",
        summary.converted, summary.failed
    );

    Ok(())
}
