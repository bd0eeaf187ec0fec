use thiserror::Error;

use crate::media::poster::PipelineError;
use crate::workflows::resolver::ResolveError;

pub const EXIT_USAGE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_SEARCH: i32 = 3;
pub const EXIT_SEASON: i32 = 4;
pub const EXIT_NO_POSTER: i32 = 5;
pub const EXIT_DOWNLOAD: i32 = 6;
pub const EXIT_OUTPUT_FILE: i32 = 7;
pub const EXIT_ENCODE: i32 = 8;
pub const EXIT_COPY: i32 = 9;
pub const EXIT_NO_MATCH: i32 = 10;
pub const EXIT_DECODE: i32 = 11;
pub const EXIT_API_KEY: i32 = 12;

pub const EXIT_CODES_HELP: &str = "\
Exit codes:
   0  success
   1  missing show name or invalid arguments
   2  could not load the image configuration
   3  show search failed
   4  season lookup failed
   5  no poster available
   6  poster download failed
   7  could not create the output file
   8  could not encode the resized image (or unknown output type)
   9  could not write the poster bytes
  10  no show matched the search
  11  could not decode the downloaded image
  12  no TMDB API key configured";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("show must be set")]
    MissingShowName,

    #[error("{0}")]
    MissingApiKey(anyhow::Error),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::MissingShowName => EXIT_USAGE,
            AppError::MissingApiKey(_) => EXIT_API_KEY,
            AppError::Resolve(e) => match e {
                ResolveError::ConfigUnavailable(_) => EXIT_CONFIG,
                ResolveError::SearchFailed { .. } => EXIT_SEARCH,
                ResolveError::NoShowMatch(_) => EXIT_NO_MATCH,
                ResolveError::SeasonUnavailable { .. } => EXIT_SEASON,
                ResolveError::NoPoster { .. } => EXIT_NO_POSTER,
            },
            AppError::Pipeline(e) => match e {
                PipelineError::Download(_) => EXIT_DOWNLOAD,
                PipelineError::OutputFile { .. } => EXIT_OUTPUT_FILE,
                PipelineError::DecodeImage(_) => EXIT_DECODE,
                PipelineError::UnsupportedOutputFormat(_) | PipelineError::EncodeImage(_) => {
                    EXIT_ENCODE
                }
                PipelineError::Copy { .. } => EXIT_COPY,
            },
        }
    }

    /// Input-side failures get the usage text printed before the error.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            AppError::MissingShowName
                | AppError::MissingApiKey(_)
                | AppError::Resolve(
                    ResolveError::ConfigUnavailable(_)
                        | ResolveError::SearchFailed { .. }
                        | ResolveError::SeasonUnavailable { .. }
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::http::NetworkError;
    use crate::infra::tmdb::MetadataError;
    use std::collections::HashSet;
    use std::io;
    use std::path::PathBuf;

    fn metadata_error() -> MetadataError {
        MetadataError::Network(NetworkError::new("https://api.test", "refused"))
    }

    fn all_errors() -> Vec<AppError> {
        vec![
            AppError::MissingShowName,
            AppError::MissingApiKey(anyhow::anyhow!("no key")),
            ResolveError::ConfigUnavailable(metadata_error()).into(),
            ResolveError::SearchFailed {
                query: "x".to_string(),
                source: metadata_error(),
            }
            .into(),
            ResolveError::NoShowMatch("x".to_string()).into(),
            ResolveError::SeasonUnavailable {
                show: "x".to_string(),
                season: 1,
                source: metadata_error(),
            }
            .into(),
            ResolveError::NoPoster {
                show: "x".to_string(),
                season: None,
            }
            .into(),
            PipelineError::Download(NetworkError::new("https://img.test", "reset")).into(),
            PipelineError::OutputFile {
                path: PathBuf::from("out.jpg"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }
            .into(),
            PipelineError::DecodeImage(image::ImageError::IoError(io::Error::from(
                io::ErrorKind::InvalidData,
            )))
            .into(),
            PipelineError::EncodeImage(image::ImageError::IoError(io::Error::from(
                io::ErrorKind::WriteZero,
            )))
            .into(),
            PipelineError::Copy {
                path: PathBuf::from("out.jpg"),
                source: io::Error::from(io::ErrorKind::WriteZero),
            }
            .into(),
        ]
    }

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let codes: Vec<i32> = all_errors().iter().map(AppError::exit_code).collect();
        assert!(codes.iter().all(|code| *code != 0));
        let unique: HashSet<i32> = codes.iter().copied().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_unsupported_format_shares_encode_code() {
        let err: AppError = PipelineError::UnsupportedOutputFormat("GIF".to_string()).into();
        assert_eq!(err.exit_code(), EXIT_ENCODE);
        assert!(!err.shows_usage());
    }

    #[test]
    fn test_usage_only_for_input_failures() {
        let with_usage: Vec<bool> = all_errors().iter().map(AppError::shows_usage).collect();
        assert_eq!(
            with_usage,
            vec![true, true, true, true, false, true, false, false, false, false, false, false]
        );
    }
}
