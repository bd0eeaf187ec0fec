use anyhow::bail;
use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct ConfigFile {
    tmdb_api_key: Option<String>,
}

/// Looks for the TMDB API key on the command line, then in `TMDB_API_KEY`,
/// then in the config file.
pub fn get_tmdb_api_key(from_flag: Option<&str>) -> Result<String> {
    if let Some(key) = non_blank(from_flag) {
        return Ok(key);
    }

    if let Some(key) = non_blank(env::var("TMDB_API_KEY").ok().as_deref()) {
        return Ok(key);
    }

    let config_path = get_config_path();
    if config_path.exists() {
        let config_content = fs::read_to_string(&config_path)?;
        if let Some(key) = parse_api_key(&config_content)? {
            return Ok(key);
        }
    }

    bail!(
        "TMDB API key not found. Pass --api-key, set the TMDB_API_KEY environment variable or create {} with tmdb_api_key = \"your-key\"",
        config_path.display()
    )
}

fn parse_api_key(config_content: &str) -> Result<Option<String>> {
    let config: ConfigFile = toml::from_str(config_content)?;
    Ok(non_blank(config.tmdb_api_key.as_deref()))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("tv-poster-getter"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        assert_eq!(get_tmdb_api_key(Some(" abc123 ")).unwrap(), "abc123");
    }

    #[test]
    fn test_parse_api_key() {
        assert_eq!(
            parse_api_key("tmdb_api_key = \"k3y\"\n").unwrap(),
            Some("k3y".to_string())
        );
        assert_eq!(parse_api_key("").unwrap(), None);
        assert_eq!(parse_api_key("tmdb_api_key = \"  \"").unwrap(), None);
        assert!(parse_api_key("tmdb_api_key = ").is_err());
    }
}
