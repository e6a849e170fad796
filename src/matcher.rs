//! Best-effort free-text address matching over smart-search candidates.

use crate::listing::RawListing;

/// Pick the candidate whose address best contains `query`.
///
/// Scores are additive: +2 when the full address contains the query, +1 when
/// the display address contains it, +1 for each address that starts with it.
/// The first candidate reaching the top score wins, so a non-empty candidate
/// list always yields a listing, even when nothing matched textually.
pub fn match_best<'a>(query: &str, candidates: &'a [RawListing]) -> Option<&'a RawListing> {
    let query = query.to_lowercase();
    let mut best: Option<(i32, &RawListing)> = None;

    for candidate in candidates {
        let score = score(&query, candidate);
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, candidate));
        }
    }

    best.map(|(_, listing)| listing)
}

/// Match score for one candidate against an already lower-cased query
pub fn score(query: &str, candidate: &RawListing) -> i32 {
    let full = candidate.full_address().unwrap_or_default().to_lowercase();
    let display = candidate.display_address().unwrap_or_default().to_lowercase();

    let mut score = 0;
    if full.contains(query) {
        score += 2;
    }
    if display.contains(query) {
        score += 1;
    }
    if full.starts_with(query) {
        score += 1;
    }
    if display.starts_with(query) {
        score += 1;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(id: &str, full: &str, display: &str) -> RawListing {
        serde_json::from_value(json!({
            "id": id,
            "attributes": {
                "address": { "full-address": full, "display-address": display }
            }
        }))
        .unwrap()
    }

    fn id(listing: Option<&RawListing>) -> Option<String> {
        listing.and_then(RawListing::listing_id)
    }

    #[test]
    fn test_empty_candidates() {
        assert!(match_best("12 Queen St", &[]).is_none());
    }

    #[test]
    fn test_single_candidate_returned_regardless_of_score() {
        let candidates = vec![candidate("only", "1 Other Road", "1 Other Road")];
        assert_eq!(id(match_best("queen st", &candidates)), Some("only".into()));
    }

    #[test]
    fn test_substring_match_beats_non_match() {
        let candidates = vec![
            candidate("a", "12 Queen St", ""),
            candidate("b", "99 Queen Street", ""),
        ];
        // "12 queen st" is not a substring of "99 queen street"
        assert_eq!(id(match_best("99 queen st", &candidates)), Some("b".into()));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let candidates = vec![
            candidate("a", "5 Jervois Road, Herne Bay", ""),
            candidate("b", "", "12 QUEEN STREET, Ponsonby"),
        ];
        assert_eq!(id(match_best("12 Queen Street", &candidates)), Some("b".into()));
    }

    #[test]
    fn test_prefix_scores_higher_than_substring() {
        let candidates = vec![
            candidate("inside", "Unit 2, 12 Queen Street", ""),
            candidate("prefix", "12 Queen Street, Ponsonby", ""),
        ];
        assert_eq!(score("12 queen street", &candidates[0]), 2);
        assert_eq!(score("12 queen street", &candidates[1]), 3);
        assert_eq!(id(match_best("12 queen street", &candidates)), Some("prefix".into()));
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let candidates = vec![
            candidate("first", "12 Queen Street, Ponsonby", "12 Queen Street"),
            candidate("second", "12 Queen Street, Ponsonby", "12 Queen Street"),
        ];
        assert_eq!(score("12 queen street", &candidates[0]), 5);
        assert_eq!(id(match_best("12 queen street", &candidates)), Some("first".into()));
    }

    #[test]
    fn test_missing_addresses_score_zero() {
        let bare: RawListing = serde_json::from_value(json!({ "id": "bare" })).unwrap();
        assert_eq!(score("queen", &bare), 0);
    }
}
