use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{AppError, EXIT_CODES_HELP};
use crate::infra::tmdb::TMDB_API_BASE;
use crate::media::poster::ResizeTarget;
use crate::workflows::resolver::PosterRequest;

#[derive(Parser, Debug)]
#[command(name = "getposter")]
#[command(about = "Download a TV show or season poster from TMDB, optionally resized")]
#[command(disable_help_flag = true, after_help = EXIT_CODES_HELP)]
pub struct Cli {
    /// The show name ** required **
    #[arg(long)]
    pub show: Option<String>,

    /// The season number; omit it or pass a negative number to fetch the show poster
    #[arg(long, allow_negative_numbers = true)]
    pub season: Option<i32>,

    /// File to output, defaults to "Season <season>-SD.jpg", or "<show>-SD.jpg" if no season is given
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Height of the downloaded poster (resizes only together with --width)
    #[arg(short = 'h', long, default_value_t = 0, allow_negative_numbers = true)]
    pub height: i64,

    /// Width of the downloaded poster (resizes only together with --height)
    #[arg(short = 'w', long, default_value_t = 0, allow_negative_numbers = true)]
    pub width: i64,

    /// TMDB API key, overrides TMDB_API_KEY and the config file
    #[arg(long)]
    pub api_key: Option<String>,

    /// Language sent with search and season requests
    #[arg(long, default_value = "en-US")]
    pub language: String,

    #[arg(long, default_value = TMDB_API_BASE, hide = true)]
    pub api_url: String,

    /// Log request details and the selected records
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

/// Everything a run needs, fixed once the flags are parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub request: PosterRequest,
    pub output: Option<PathBuf>,
    pub resize: Option<ResizeTarget>,
    pub api_key: Option<String>,
    pub language: String,
    pub api_url: String,
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings, AppError> {
        let name = match self.show {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(AppError::MissingShowName),
        };

        // negative seasons select the show poster
        let request = match self.season.and_then(|season| u32::try_from(season).ok()) {
            Some(season) => PosterRequest::Season { name, season },
            None => PosterRequest::Show { name },
        };

        Ok(Settings {
            request,
            output: self.out,
            resize: ResizeTarget::from_dimensions(self.width, self.height),
            api_key: self.api_key,
            language: self.language,
            api_url: self.api_url,
        })
    }
}

/// Long options that are also accepted with a single dash, e.g. `-show Firefly`.
const SINGLE_DASH_LONGS: [&str; 3] = ["show", "season", "out"];

/// Rewrites `-show`, `-season` and `-out` (with or without `=value`) to their
/// double-dash spelling. Short flags such as `-h` and `-w` pass through, as
/// does everything after `--`.
pub fn expand_single_dash_longs<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_terminator = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if after_terminator {
                return arg;
            }
            if arg == "--" {
                after_terminator = true;
                return arg;
            }
            let rewritten = arg
                .to_str()
                .filter(|text| is_single_dash_long(text))
                .map(|text| OsString::from(format!("-{text}")));
            rewritten.unwrap_or(arg)
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    SINGLE_DASH_LONGS.contains(&name)
}
