//! District sentiment computation over the tally aggregates.
//!
//! The repository returns per-district party totals already ordered by
//! district, total descending, then party name ascending. Folding that into
//! one row per district therefore just keeps the first row seen, and ties on
//! total resolve deterministically to the lexicographically smaller party.

use std::collections::BTreeMap;

use likes_shared::PartyTotal;
use serde::Serialize;

/// The dominant party for one district, as served to the map client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistrictSentiment {
    pub party: String,
    pub party_short: String,
    pub color: String,
    pub total_likes: i64,
}

/// Picks the dominant party per district from ordered party totals.
///
/// # Arguments
///
/// * `totals` - Rows ordered by district, then total descending, then party
///   ascending (the repository contract).
pub fn dominant_by_district(totals: &[PartyTotal]) -> BTreeMap<String, DistrictSentiment> {
    let mut sentiment = BTreeMap::new();
    for row in totals {
        sentiment
            .entry(row.district.clone())
            .or_insert_with(|| DistrictSentiment {
                party: row.party.clone(),
                party_short: row.party_short.clone(),
                color: election_data::party_color(&row.party).to_string(),
                total_likes: row.total_likes,
            });
    }
    sentiment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(district: &str, party: &str, short: &str, likes: i64) -> PartyTotal {
        PartyTotal {
            district: district.to_string(),
            party: party.to_string(),
            party_short: short.to_string(),
            total_likes: likes,
        }
    }

    #[test]
    fn test_first_row_per_district_wins() {
        let totals = vec![
            total("JHAPA", "Nepali Congress", "NC", 5),
            total("JHAPA", "CPN-UML", "UML", 2),
            total("KASKI", "CPN-UML", "UML", 3),
        ];

        let sentiment = dominant_by_district(&totals);
        assert_eq!(sentiment.len(), 2);
        assert_eq!(sentiment["JHAPA"].party, "Nepali Congress");
        assert_eq!(sentiment["JHAPA"].total_likes, 5);
        assert_eq!(sentiment["KASKI"].party, "CPN-UML");
    }

    #[test]
    fn test_tie_resolves_to_lexicographically_smaller_party() {
        // The repository orders equal totals by party name ascending.
        let totals = vec![
            total("BARA", "Janamat Party", "JP", 4),
            total("BARA", "Nepali Congress", "NC", 4),
        ];

        let sentiment = dominant_by_district(&totals);
        assert_eq!(sentiment["BARA"].party, "Janamat Party");
    }

    #[test]
    fn test_known_party_gets_its_color() {
        let totals = vec![total("JHAPA", "Nepali Congress", "NC", 1)];
        let sentiment = dominant_by_district(&totals);
        assert_eq!(sentiment["JHAPA"].color, "#e11d48");
    }

    #[test]
    fn test_unknown_party_gets_fallback_color() {
        let totals = vec![total("JHAPA", "Brand New Party", "BNP", 1)];
        let sentiment = dominant_by_district(&totals);
        assert_eq!(sentiment["JHAPA"].color, election_data::DEFAULT_PARTY_COLOR);
    }

    #[test]
    fn test_empty_totals_give_empty_sentiment() {
        assert!(dominant_by_district(&[]).is_empty());
    }
}
