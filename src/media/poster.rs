use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageOutputFormat};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::infra::http::{HttpGetter, NetworkError};

/// Quality the JPEG output is written with.
const JPEG_QUALITY: u8 = 75;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("download failed: {0}")]
    Download(#[source] NetworkError),

    #[error("could not create {}: {source}", .path.display())]
    OutputFile { path: PathBuf, source: io::Error },

    #[error("could not decode the downloaded image: {0}")]
    DecodeImage(#[source] ImageError),

    #[error("unknown output type {0:?}")]
    UnsupportedOutputFormat(String),

    #[error("could not encode the resized image: {0}")]
    EncodeImage(#[source] ImageError),

    #[error("could not write {}: {source}", .path.display())]
    Copy { path: PathBuf, source: io::Error },
}

/// Exact output dimensions. Only built when both are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: u32,
}

impl ResizeTarget {
    pub fn from_dimensions(width: i64, height: i64) -> Option<Self> {
        let width = u32::try_from(width).ok().filter(|w| *w > 0)?;
        let height = u32::try_from(height).ok().filter(|h| *h > 0)?;
        Some(Self { width, height })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Picks the encoder from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(PipelineError::UnsupportedOutputFormat(
                extension.to_uppercase(),
            )),
        }
    }
}

/// Downloads `url` into `output`. With a resize target the image is decoded,
/// resized with Lanczos3 and re-encoded by extension; otherwise the bytes are
/// written as downloaded.
pub fn write_poster<G: HttpGetter>(
    getter: &G,
    url: &str,
    output: &Path,
    resize: Option<ResizeTarget>,
) -> Result<(), PipelineError> {
    let data = getter.get_bytes(url).map_err(PipelineError::Download)?;
    tracing::debug!("downloaded {} bytes from {url}", data.len());

    let file = File::create(output).map_err(|source| PipelineError::OutputFile {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    match resize {
        Some(target) => {
            let resized = resize_image(&data, target)?;
            let format = OutputFormat::from_path(output)?;
            encode_image(&resized, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| PipelineError::EncodeImage(ImageError::IoError(e)))?;
        }
        None => {
            let copy_error = |source| PipelineError::Copy {
                path: output.to_path_buf(),
                source,
            };
            io::copy(&mut data.as_slice(), &mut writer).map_err(copy_error)?;
            writer.flush().map_err(copy_error)?;
        }
    }

    Ok(())
}

pub fn resize_image(data: &[u8], target: ResizeTarget) -> Result<DynamicImage, PipelineError> {
    let image = image::load_from_memory(data).map_err(PipelineError::DecodeImage)?;
    tracing::debug!(
        "resizing {}x{} to {}x{}",
        image.width(),
        image.height(),
        target.width,
        target.height
    );
    Ok(image.resize_exact(target.width, target.height, FilterType::Lanczos3))
}

fn encode_image<W: Write + io::Seek>(
    image: &DynamicImage,
    format: OutputFormat,
    writer: &mut W,
) -> Result<(), PipelineError> {
    let result = match format {
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_to(writer, ImageOutputFormat::Jpeg(JPEG_QUALITY))
        }
        OutputFormat::Png => image.write_to(writer, ImageOutputFormat::Png),
    };
    result.map_err(PipelineError::EncodeImage)
}
