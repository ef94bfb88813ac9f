//! Row-key derivation for the ledger and tally tables.
//!
//! Both tables use text primary keys derived from the mutation target. The
//! tally key strips everything outside `[A-Za-z0-9 ]` from the candidate name
//! so punctuation variants of the same name land on the same row.

/// Derives the ledger row key for a (user, district, zone) triple.
///
/// The district is expected to already be canonicalized (upper-cased).
pub fn ledger_key(user_id: &str, district: &str, zone: i32) -> String {
    format!("{}_{}_{}", user_id, district, zone)
}

/// Derives the tally row key for a (district, zone, candidate) triple.
///
/// The candidate name is sanitized to alphanumerics and spaces, which keeps
/// the key stable across repeated inserts of slightly different spellings
/// ("K.P. Oli" and "KP Oli" collapse to the same row).
pub fn tally_key(district: &str, zone: i32, candidate_name: &str) -> String {
    let sanitized: String = candidate_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    format!("{}_{}_{}", district, zone, sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_key_format() {
        assert_eq!(ledger_key("fb123", "JHAPA", 5), "fb123_JHAPA_5");
    }

    #[test]
    fn test_tally_key_strips_punctuation() {
        assert_eq!(tally_key("JHAPA", 5, "K.P. Oli"), "JHAPA_5_KP Oli");
    }

    #[test]
    fn test_tally_key_stable_across_punctuation_variants() {
        assert_eq!(
            tally_key("JHAPA", 5, "K.P. Oli"),
            tally_key("JHAPA", 5, "KP Oli"),
        );
    }

    #[test]
    fn test_tally_key_keeps_spaces_and_digits() {
        assert_eq!(tally_key("BARA", 2, "Ram Bahadur 2"), "BARA_2_Ram Bahadur 2");
    }
}
