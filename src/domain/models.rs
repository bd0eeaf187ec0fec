use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// The API sends `null` for absent paths and dates; treat it like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of the `/configuration` endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ImageServingConfig {
    pub images: ImageSizes,
    pub change_keys: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ImageSizes {
    pub base_url: String,
    pub secure_base_url: String,
    pub backdrop_sizes: Vec<String>,
    pub logo_sizes: Vec<String>,
    pub poster_sizes: Vec<String>,
    pub profile_sizes: Vec<String>,
    pub still_sizes: Vec<String>,
}

/// One page of `/search/tv` results, in API order.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ShowQuery {
    pub page: u32,
    pub results: Vec<ShowCandidate>,
    pub total_results: u32,
    pub total_pages: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ShowCandidate {
    pub id: u64,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original_name: String,
    // Empty when the show has no poster
    #[serde(deserialize_with = "null_as_default")]
    pub poster_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub backdrop_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_air_date: String,
    pub origin_country: Vec<String>,
    pub genre_ids: Vec<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub original_language: String,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: u64,
}

/// Response of `/tv/{id}/season/{n}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SeasonRecord {
    #[serde(rename = "_id")]
    pub object_id: String,
    pub id: u64,
    pub season_number: u32,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub air_date: String,
    // Empty when the season has no poster
    #[serde(deserialize_with = "null_as_default")]
    pub poster_path: String,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Episode {
    pub id: u64,
    pub season_number: u32,
    pub episode_number: u32,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub air_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub production_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub still_path: String,
    pub vote_average: f64,
    pub vote_count: u64,
    pub crew: Vec<CrewMember>,
    pub guest_stars: Vec<GuestStar>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CrewMember {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub credit_id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_path: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GuestStar {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub credit_id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub character: String,
    pub order: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_path: String,
}

fn write_pretty<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match serde_json::to_string_pretty(value) {
        Ok(json) => f.write_str(&json),
        Err(e) => write!(f, "{e}"),
    }
}

impl fmt::Display for ImageServingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pretty(self, f)
    }
}

impl fmt::Display for ShowQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pretty(self, f)
    }
}

impl fmt::Display for ShowCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pretty(self, f)
    }
}

impl fmt::Display for SeasonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pretty(self, f)
    }
}
