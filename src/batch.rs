//! Batch conversion of every raw frame in a directory.
//!
//! The status lines written to `out` are the user-facing contract of the
//! tool; diagnostics go through `tracing` instead.

use std::io::Write;
use std::path::Path;

use tracing::{error, info};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::conversions::RawToFitsPipeline;
use crate::image_pipeline::fits::FitsWriter;
use crate::image_pipeline::raw::RawImageReader;
use crate::scan::scan_raw_files;

/// Outcome counts for one directory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Converts every `.cr2` file in `dir` to a sibling `.fts` file.
///
/// One status line per file is written to `out`. A file that fails to
/// load or save is reported and counted; it never aborts the batch. The
/// only error returned is a failed scan of `dir` itself (or a broken
/// `out` stream).
pub fn convert_directory<R: RawImageReader, W: FitsWriter>(
    dir: &Path,
    pipeline: &RawToFitsPipeline<R, W>,
    out: &mut dyn Write,
) -> Result<BatchSummary> {
    let entries = scan_raw_files(dir)?;
    info!(
        count = entries.len(),
        directory = %dir.display(),
        "Scanned for raw frames"
    );

    let mut summary = BatchSummary::default();
    for entry in &entries {
        let destination = entry.path().with_extension("fts");
        let destination_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match pipeline.convert_file(entry.path(), &destination) {
            Ok(()) => {
                writeln!(out, "{} saved as {}", entry.name(), destination_name)?;
                summary.converted += 1;
            }
            Err(e) => {
                error!(source = entry.name(), error = %e, "Conversion failed");
                writeln!(out, "{} FAILED to save as {}", entry.name(), destination_name)?;
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::image_pipeline::common::error::ConversionError;
    use crate::image_pipeline::debayer::RgbImageData;
    use crate::image_pipeline::fits::ConversionConfig;
    use crate::image_pipeline::raw::{CameraMetadata, RawImageData};

    /// Decodes any input bytes into a fixed tiny mosaic.
    struct StubReader;

    impl RawImageReader for StubReader {
        fn read_raw(&self, _data: &[u8]) -> crate::image_pipeline::Result<RawImageData> {
            Ok(RawImageData {
                width: 2,
                height: 2,
                cpp: 1,
                data: vec![0u16; 4],
                bits_per_sample: 16,
                cfa_pattern: "RGGB".to_string(),
                blacklevels: [0; 4],
                whitelevels: [u16::MAX; 4],
                wb_coeffs: [1.0; 4],
                metadata: CameraMetadata::default(),
            })
        }
    }

    /// Fails for one named source file and writes a marker for the rest.
    struct SelectiveWriter {
        fail_for: &'static str,
    }

    impl FitsWriter for SelectiveWriter {
        fn write_fits(
            &self,
            _image: &RawImageData,
            source: Option<&str>,
            output: &mut dyn Write,
            _config: &ConversionConfig,
        ) -> crate::image_pipeline::Result<()> {
            if source == Some(self.fail_for) {
                return Err(ConversionError::EncodeError("forced failure".to_string()));
            }
            output.write_all(b"fits")?;
            Ok(())
        }

        fn write_rgb_fits(
            &self,
            _image: &RgbImageData,
            source: Option<&str>,
            output: &mut dyn Write,
            _config: &ConversionConfig,
        ) -> crate::image_pipeline::Result<()> {
            if source == Some(self.fail_for) {
                return Err(ConversionError::EncodeError("forced failure".to_string()));
            }
            output.write_all(b"fits")?;
            Ok(())
        }
    }

    fn test_pipeline(
        fail_for: &'static str,
    ) -> RawToFitsPipeline<StubReader, SelectiveWriter> {
        RawToFitsPipeline::with_custom(
            StubReader,
            SelectiveWriter { fail_for },
            ConversionConfig::builder().debayer(false).build(),
        )
    }

    #[test]
    fn converts_each_raw_file_and_skips_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("IMG_0001.CR2"), b"raw").unwrap();
        fs::write(dir.path().join("IMG_0002.cr2"), b"raw").unwrap();
        fs::write(dir.path().join("notes.txt"), b"text").unwrap();

        let pipeline = test_pipeline("");
        let mut out = Vec::new();
        let summary = convert_directory(dir.path(), &pipeline, &mut out).unwrap();

        assert_eq!(summary, BatchSummary { converted: 2, failed: 0 });

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("IMG_0001.CR2 saved as IMG_0001.fts"));
        assert!(output.contains("IMG_0002.cr2 saved as IMG_0002.fts"));
        assert!(!output.contains("notes.txt"));
        assert_eq!(output.lines().count(), 2);

        assert_eq!(fs::read(dir.path().join("IMG_0001.fts")).unwrap(), b"fits");
        assert_eq!(fs::read(dir.path().join("IMG_0002.fts")).unwrap(), b"fits");
        assert!(!dir.path().join("notes.fts").exists());
    }

    #[test]
    fn one_failure_does_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("IMG_0001.CR2"), b"raw").unwrap();
        fs::write(dir.path().join("IMG_0002.cr2"), b"raw").unwrap();

        let pipeline = test_pipeline("IMG_0002.cr2");
        let mut out = Vec::new();
        let summary = convert_directory(dir.path(), &pipeline, &mut out).unwrap();

        assert_eq!(summary, BatchSummary { converted: 1, failed: 1 });

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("IMG_0001.CR2 saved as IMG_0001.fts"));
        assert!(output.contains("IMG_0002.cr2 FAILED to save as IMG_0002.fts"));
    }

    #[test]
    fn unreadable_directory_is_the_only_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let pipeline = test_pipeline("");
        let mut out = Vec::new();
        let result = convert_directory(&missing, &pipeline, &mut out);
        assert!(matches!(result, Err(ConversionError::NotFound(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn empty_directory_produces_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = test_pipeline("");
        let mut out = Vec::new();
        let summary = convert_directory(dir.path(), &pipeline, &mut out).unwrap();
        assert_eq!(summary, BatchSummary::default());
        assert!(out.is_empty());
    }
}
