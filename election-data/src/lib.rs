//! Reference election dataset for the likes service.
//!
//! This crate embeds the scraped candidate roster (district → zone →
//! candidates) and exposes the lookups the write path uses to reject votes
//! for targets that do not exist. It also carries the party color table and
//! province metadata used by the sentiment read path.
//!
//! The dataset is a static asset: it is parsed once on first access and never
//! mutated at runtime.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Fallback color for parties missing from the color table.
pub const DEFAULT_PARTY_COLOR: &str = "#6b7280";

/// A candidate standing in one zone of a district.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    pub party: String,
    pub party_short: String,
    pub color: String,
}

/// One first-past-the-post zone (constituency) within a district.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElectionZone {
    pub zone: i32,
    pub candidates: Vec<Candidate>,
}

impl ElectionZone {
    /// Whether a candidate with this exact name stands in this zone.
    pub fn has_candidate(&self, name: &str) -> bool {
        self.candidates.iter().any(|c| c.name == name)
    }
}

/// A district with its electoral zones and candidate roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistrictData {
    pub district: String,
    pub province: i32,
    pub hq: String,
    pub zones: Vec<ElectionZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_voters: Option<u64>,
}

impl DistrictData {
    /// Looks up a zone by number.
    pub fn zone(&self, zone: i32) -> Option<&ElectionZone> {
        self.zones.iter().find(|z| z.zone == zone)
    }
}

/// Aggregated candidate counts for one party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyStats {
    pub party: String,
    pub count: usize,
    pub color: String,
}

static ELECTION_DATA: LazyLock<Vec<DistrictData>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../data/candidates.json"))
        .expect("embedded candidates.json is valid")
});

static PARTY_COLORS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Nepali Congress", "#e11d48"),
        ("CPN-UML", "#2563eb"),
        ("Nepali Communist Party", "#991b1b"),
        ("Rastriya Swotantra Party", "#f59e0b"),
        ("Rastriya Swatantra Party", "#f59e0b"),
        ("CPN (Maoist Centre)", "#dc2626"),
        ("CPN-Maoist Centre", "#dc2626"),
        ("Rastriya Prajatantra Party", "#6366f1"),
        ("Janata Samajwadi Party", "#10b981"),
        ("Janata Samajbadi Party", "#10b981"),
        ("CPN-Unified Socialist", "#8b5cf6"),
        ("CPN (Unified Socialist)", "#8b5cf6"),
        ("Janamat Party", "#14b8a6"),
        ("Loktantrik Samajwadi Party", "#f97316"),
        ("Loktantrik Samajbadi Party", "#f97316"),
        ("Nagarik Unmukti Party", "#84cc16"),
        ("Independent", "#6b7280"),
    ])
});

/// All districts in the dataset.
pub fn districts() -> &'static [DistrictData] {
    &ELECTION_DATA
}

/// Looks up a district by name, case-insensitively.
pub fn district(name: &str) -> Option<&'static DistrictData> {
    let normalized = name.trim().to_uppercase();
    ELECTION_DATA
        .iter()
        .find(|d| d.district.to_uppercase() == normalized)
}

/// All districts within a province.
pub fn districts_by_province(province: i32) -> Vec<&'static DistrictData> {
    ELECTION_DATA
        .iter()
        .filter(|d| d.province == province)
        .collect()
}

/// The display color for a party, with a neutral fallback for unknown names.
pub fn party_color(party: &str) -> &'static str {
    PARTY_COLORS.get(party).copied().unwrap_or(DEFAULT_PARTY_COLOR)
}

/// The name of a province (1 through 7).
pub fn province_name(province: i32) -> Option<&'static str> {
    match province {
        1 => Some("Koshi Pradesh"),
        2 => Some("Madhesh Pradesh"),
        3 => Some("Bagmati Pradesh"),
        4 => Some("Gandaki Pradesh"),
        5 => Some("Lumbini Pradesh"),
        6 => Some("Karnali Pradesh"),
        7 => Some("Sudurpashchim Pradesh"),
        _ => None,
    }
}

/// The party fielding the most candidates across a district's zones.
///
/// This is the pre-election view of district leaning, used before any likes
/// exist. Ties resolve to whichever party was counted first.
pub fn dominant_party(district: &DistrictData) -> Option<PartyStats> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for zone in &district.zones {
        for candidate in &zone.candidates {
            *counts.entry(candidate.party.as_str()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(party, count)| PartyStats {
            party: party.to_string(),
            count,
            color: party_color(party).to_string(),
        })
}

/// Total candidates fielded per party across every district, most first.
pub fn party_global_stats() -> Vec<PartyStats> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for district in districts() {
        for zone in &district.zones {
            for candidate in &zone.candidates {
                *counts.entry(candidate.party.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut stats: Vec<PartyStats> = counts
        .into_iter()
        .map(|(party, count)| PartyStats {
            party: party.to_string(),
            count,
            color: party_color(party).to_string(),
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.party.cmp(&b.party)));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_parses_and_is_nonempty() {
        assert!(!districts().is_empty());
    }

    #[test]
    fn test_district_lookup_is_case_insensitive() {
        let upper = district("JHAPA").expect("JHAPA present");
        let lower = district("jhapa").expect("jhapa resolves");
        assert_eq!(upper.district, lower.district);
    }

    #[test]
    fn test_district_lookup_trims_whitespace() {
        assert!(district(" jhapa ").is_some());
    }

    #[test]
    fn test_unknown_district_is_none() {
        assert!(district("FAKEDISTRICT").is_none());
    }

    #[test]
    fn test_zone_and_candidate_lookup() {
        let jhapa = district("JHAPA").unwrap();
        let zone = jhapa.zone(5).expect("JHAPA has a zone 5");
        assert!(!zone.candidates.is_empty());
        let first = &zone.candidates[0];
        assert!(zone.has_candidate(&first.name));
        assert!(!zone.has_candidate("Nobody Atall"));
    }

    #[test]
    fn test_unknown_zone_is_none() {
        let jhapa = district("JHAPA").unwrap();
        assert!(jhapa.zone(99).is_none());
    }

    #[test]
    fn test_party_color_fallback() {
        assert_eq!(party_color("Nepali Congress"), "#e11d48");
        assert_eq!(party_color("Made Up Party"), DEFAULT_PARTY_COLOR);
    }

    #[test]
    fn test_province_names() {
        assert_eq!(province_name(1), Some("Koshi Pradesh"));
        assert_eq!(province_name(7), Some("Sudurpashchim Pradesh"));
        assert_eq!(province_name(8), None);
    }

    #[test]
    fn test_dominant_party_counts_candidates() {
        let jhapa = district("JHAPA").unwrap();
        let dominant = dominant_party(jhapa).expect("JHAPA has candidates");
        assert!(dominant.count >= 1);
        assert!(!dominant.party.is_empty());
    }

    #[test]
    fn test_party_global_stats_sorted_descending() {
        let stats = party_global_stats();
        assert!(!stats.is_empty());
        for pair in stats.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }
}
