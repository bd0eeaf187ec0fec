use thiserror::Error;

use crate::infra::http::HttpGetter;
use crate::infra::tmdb::{MetadataError, TmdbClient};
use crate::workflows::matcher::closest_match;

/// Size segment placed between the image base URL and the poster path.
pub const POSTER_SIZE: &str = "original";

/// What poster to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterRequest {
    Show { name: String },
    Season { name: String, season: u32 },
}

impl PosterRequest {
    pub fn show_name(&self) -> &str {
        match self {
            PosterRequest::Show { name } | PosterRequest::Season { name, .. } => name,
        }
    }

    pub fn season(&self) -> Option<u32> {
        match self {
            PosterRequest::Show { .. } => None,
            PosterRequest::Season { season, .. } => Some(*season),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPoster {
    /// Absolute image URL
    pub url: String,
    /// Display name of the selected show
    pub show_name: String,
    pub season: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not load the image configuration: {0}")]
    ConfigUnavailable(#[source] MetadataError),

    #[error("searching for {query:?} failed: {source}")]
    SearchFailed {
        query: String,
        source: MetadataError,
    },

    #[error("no show results matching {0:?}")]
    NoShowMatch(String),

    #[error("could not load {show:?} season {season}: {source}")]
    SeasonUnavailable {
        show: String,
        season: u32,
        source: MetadataError,
    },

    #[error("{} does not have a poster", poster_subject(.show, .season))]
    NoPoster { show: String, season: Option<u32> },
}

fn poster_subject(show: &str, season: &Option<u32>) -> String {
    match season {
        Some(season) => format!("{show:?} season {season}"),
        None => format!("{show:?}"),
    }
}

/// Turns a request into an absolute poster URL: image config, show search,
/// closest match, then the season lookup when one was asked for.
pub fn resolve_poster<G: HttpGetter>(
    client: &TmdbClient<G>,
    request: &PosterRequest,
) -> Result<ResolvedPoster, ResolveError> {
    let config = client
        .fetch_config()
        .map_err(ResolveError::ConfigUnavailable)?;
    tracing::debug!("{config}");
    let base_url = config.images.secure_base_url;
    tracing::info!("image base_url = {base_url:?}");

    let query = request.show_name();
    let shows = client
        .search_shows(query)
        .map_err(|source| ResolveError::SearchFailed {
            query: query.to_string(),
            source,
        })?;

    if shows.results.is_empty() {
        return Err(ResolveError::NoShowMatch(query.to_string()));
    }

    let (index, score) = closest_match(&shows.results, query);
    let show = &shows.results[index];
    tracing::info!(
        "selected {:?} (id {}, result {index}, score {score:.3})",
        show.name,
        show.id
    );
    tracing::debug!("{show}");

    let poster_path = match request {
        PosterRequest::Show { .. } => {
            if show.poster_path.is_empty() {
                return Err(ResolveError::NoPoster {
                    show: show.name.clone(),
                    season: None,
                });
            }
            show.poster_path.clone()
        }
        PosterRequest::Season { season, .. } => {
            tracing::info!("show id = {}", show.id);
            let record = client.fetch_season(show.id, *season).map_err(|source| {
                ResolveError::SeasonUnavailable {
                    show: query.to_string(),
                    season: *season,
                    source,
                }
            })?;
            tracing::debug!("{record}");
            if record.poster_path.is_empty() {
                return Err(ResolveError::NoPoster {
                    show: query.to_string(),
                    season: Some(*season),
                });
            }
            record.poster_path
        }
    };

    let url = format!("{base_url}{POSTER_SIZE}{poster_path}");
    tracing::info!("poster path = {url}");

    Ok(ResolvedPoster {
        url,
        show_name: show.name.clone(),
        season: request.season(),
    })
}
