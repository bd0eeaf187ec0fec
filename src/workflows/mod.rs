pub mod matcher;
pub mod resolver;

use std::path::PathBuf;

use crate::cli::Settings;
use crate::error::AppError;
use crate::infra::http::HttpGetter;
use crate::infra::tmdb::TmdbClient;
use crate::media::poster::write_poster;
use resolver::{resolve_poster, PosterRequest, ResolvedPoster};

/// Resolves the requested poster and writes it to disk. Returns the path written.
pub fn fetch_poster<G: HttpGetter>(
    client: &TmdbClient<G>,
    settings: &Settings,
) -> Result<PathBuf, AppError> {
    match &settings.request {
        PosterRequest::Show { name } => tracing::info!("{name:?} show only."),
        PosterRequest::Season { name, season } => tracing::info!("{name:?} : Season {season}"),
    }

    let resolved = resolve_poster(client, &settings.request)?;

    let output = settings
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&resolved));

    write_poster(client.getter(), &resolved.url, &output, settings.resize)?;

    let show = settings.request.show_name();
    match settings.request.season() {
        Some(season) => tracing::info!(
            "successfully downloaded poster for {show:?} season {season} to {:?}",
            output.display().to_string()
        ),
        None => tracing::info!(
            "successfully downloaded poster for {show:?} to {:?}",
            output.display().to_string()
        ),
    }

    Ok(output)
}

/// `<Show>-SD.jpg` for show posters, `Season <N>-SD.jpg` for season posters.
pub fn default_output_path(resolved: &ResolvedPoster) -> PathBuf {
    match resolved.season {
        Some(season) => PathBuf::from(format!("Season {season}-SD.jpg")),
        None => PathBuf::from(format!("{}-SD.jpg", sanitize_filename(&resolved.show_name))),
    }
}

fn sanitize_filename(name: &str) -> String {
    // Remove or replace invalid filename characters
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXIT_DECODE, EXIT_NO_MATCH, EXIT_NO_POSTER};
    use crate::infra::http::testing::FakeGetter;
    use crate::media::poster::ResizeTarget;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"{"images":{"secure_base_url":"https://img.test/t/p/"}}"#;
    const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00fixed poster bytes\xFF\xD9";

    fn client(getter: FakeGetter) -> TmdbClient<FakeGetter> {
        TmdbClient::new(
            getter,
            "key".to_string(),
            "en-US".to_string(),
            "https://api.test/3".to_string(),
        )
    }

    fn settings(request: PosterRequest, output: PathBuf, resize: Option<ResizeTarget>) -> Settings {
        Settings {
            request,
            output: Some(output),
            resize,
            api_key: None,
            language: "en-US".to_string(),
            api_url: "https://api.test/3".to_string(),
        }
    }

    fn resolved(show_name: &str, season: Option<u32>) -> ResolvedPoster {
        ResolvedPoster {
            url: "https://img.test/t/p/original/p.jpg".to_string(),
            show_name: show_name.to_string(),
            season,
        }
    }

    #[test]
    fn test_show_poster_copied_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("poster.jpg");
        let getter = FakeGetter::new()
            .route("/configuration", CONFIG)
            .route(
                "/search/tv",
                r#"{"results":[{"id":1437,"name":"Firefly","poster_path":"/firefly.jpg"}]}"#,
            )
            .route("/original/firefly.jpg", JPEG_BYTES);
        let request = PosterRequest::Show {
            name: "Firefly".to_string(),
        };

        let written = fetch_poster(&client(getter), &settings(request, output.clone(), None)).unwrap();

        assert_eq!(written, output);
        assert_eq!(fs::read(&output).unwrap(), JPEG_BYTES);
    }

    #[test]
    fn test_season_without_poster_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("season.jpg");
        let getter = FakeGetter::new()
            .route("/configuration", CONFIG)
            .route(
                "/search/tv",
                r#"{"results":[{"id":9,"name":"X","poster_path":"/x.jpg"}]}"#,
            )
            .route("/tv/9/season/2", r#"{"season_number":2,"poster_path":""}"#);
        let request = PosterRequest::Season {
            name: "X".to_string(),
            season: 2,
        };
        let resize = ResizeTarget::from_dimensions(300, 450);
        let client = client(getter);

        let err = fetch_poster(&client, &settings(request, output.clone(), resize)).unwrap_err();

        assert_eq!(err.exit_code(), EXIT_NO_POSTER);
        assert!(!output.exists());
        assert!(!client.getter().was_requested("/original/"));
    }

    #[test]
    fn test_no_results_is_its_own_failure() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("poster.jpg");
        let getter = FakeGetter::new()
            .route("/configuration", CONFIG)
            .route("/search/tv", r#"{"results":[],"total_results":0}"#);
        let request = PosterRequest::Show {
            name: "Nope".to_string(),
        };

        let err = fetch_poster(&client(getter), &settings(request, output, None)).unwrap_err();

        assert_eq!(err.exit_code(), EXIT_NO_MATCH);
        assert!(!err.shows_usage());
    }

    #[test]
    fn test_resize_of_non_image_fails_decode() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("poster.png");
        let getter = FakeGetter::new()
            .route("/configuration", CONFIG)
            .route("/search/tv", r#"{"results":[{"id":1,"name":"X","poster_path":"/x.jpg"}]}"#)
            .route("/original/x.jpg", "definitely not pixels");
        let request = PosterRequest::Show {
            name: "X".to_string(),
        };
        let resize = ResizeTarget::from_dimensions(10, 10);

        let err = fetch_poster(&client(getter), &settings(request, output, resize)).unwrap_err();

        assert_eq!(err.exit_code(), EXIT_DECODE);
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(&resolved("Firefly", None)),
            PathBuf::from("Firefly-SD.jpg")
        );
        assert_eq!(
            default_output_path(&resolved("Firefly", Some(3))),
            PathBuf::from("Season 3-SD.jpg")
        );
        assert_eq!(
            default_output_path(&resolved("Face/Off: The Series", None)),
            PathBuf::from("Face-Off- The Series-SD.jpg")
        );
    }
}
