use crate::domain::models::ShowCandidate;

/// Trims, lower-cases and drops a single leading "the ".
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    match lowered.strip_prefix("the ") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Jaro-Winkler similarity of two show names after normalization. Only
/// scores above 0.7 get the shared-prefix boost, capped at four characters.
pub fn name_similarity(query: &str, candidate: &str) -> f64 {
    strsim::jaro_winkler(&normalize_name(query), &normalize_name(candidate))
}

/// Picks the candidate whose name is closest to `query`.
///
/// The first candidate is the default: a later one only wins with a strictly
/// higher score, so ties (including all-zero scores) go to the earliest entry.
///
/// Returns the index into `candidates` and the winning score. Callers must
/// reject an empty candidate list beforehand.
pub fn closest_match(candidates: &[ShowCandidate], query: &str) -> (usize, f64) {
    assert!(!candidates.is_empty(), "closest_match needs at least one candidate");

    let mut best_index = 0;
    let mut best_score = 0.0;

    for (index, candidate) in candidates.iter().enumerate() {
        let score = name_similarity(query, &candidate.name);
        tracing::debug!("{:?} scored {score:.4}", candidate.name);
        if score > best_score {
            best_score = score;
            best_index = index;
        }
    }

    (best_index, best_score)
}
