//! Boundary-anchored alias matching.
//!
//! An alias is "mentioned" when it occurs in the normalized answer between
//! delimiters (space, comma, or either end of the answer). This tolerates
//! list-like answers such as `"sophia, marcus reid, elena"` without a full
//! tokenizer: `"elena"` does not match inside `"helena"`, while multi-word
//! aliases like `"dr elena vasquez"` still match.

use std::collections::BTreeSet;

use crate::model::Suspect;

fn is_delimiter(c: char) -> bool {
    c == ' ' || c == ','
}

/// Whether `alias` is present in `normalized` on word boundaries.
///
/// Both arguments must already be normalized. The alias is matched
/// literally; its punctuation carries no pattern meaning.
pub fn contains_alias(normalized: &str, alias: &str) -> bool {
    if alias.is_empty() {
        return false;
    }

    let padded = format!(" {normalized} ");
    let mut from = 0;

    while let Some(offset) = padded[from..].find(alias) {
        let start = from + offset;
        let end = start + alias.len();

        if padded[..start].ends_with(is_delimiter) && padded[end..].starts_with(is_delimiter) {
            return true;
        }

        // Step one character so overlapping occurrences are still tried.
        from = start + padded[start..].chars().next().map_or(1, char::len_utf8);
    }

    false
}

/// Whether any alias of `suspect` is mentioned in `normalized`.
pub fn mentions(normalized: &str, suspect: &Suspect) -> bool {
    suspect
        .aliases
        .iter()
        .any(|alias| contains_alias(normalized, alias))
}

/// Ids of the suspects in `roster` mentioned by `normalized`.
pub fn resolve_mentions<'a, I>(normalized: &str, roster: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Suspect>,
{
    roster
        .into_iter()
        .filter(|suspect| mentions(normalized, suspect))
        .map(|suspect| suspect.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suspect(id: &str, aliases: &[&str]) -> Suspect {
        Suspect {
            id: id.into(),
            name: id.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn whole_answer_matches() {
        assert!(contains_alias("sophia", "sophia"));
        assert!(contains_alias("dr. elena vasquez", "dr. elena vasquez"));
    }

    #[test]
    fn matches_between_spaces_and_commas() {
        let input = "sophia, marcus reid, elena";
        assert!(contains_alias(input, "sophia"));
        assert!(contains_alias(input, "marcus reid"));
        assert!(contains_alias(input, "marcus"));
        assert!(contains_alias(input, "elena"));
        assert!(contains_alias("marcus,", "marcus"));
        assert!(contains_alias("i think laura did it", "laura"));
    }

    #[test]
    fn rejects_partial_words() {
        assert!(!contains_alias("marcus helena", "elena"));
        assert!(!contains_alias("sophias", "sophia"));
        assert!(!contains_alias("laurel", "laura"));
        assert!(!contains_alias("mrs grayson", "mr grayson"));
    }

    #[test]
    fn period_is_literal() {
        assert!(contains_alias("dr. elena", "dr. elena"));
        assert!(!contains_alias("drx elena", "dr. elena"));
    }

    #[test]
    fn later_occurrence_can_qualify() {
        assert!(contains_alias("helena elena", "elena"));
        assert!(contains_alias("vipers viper", "viper"));
    }

    #[test]
    fn empty_alias_never_matches() {
        assert!(!contains_alias("anything", ""));
        assert!(!contains_alias("", ""));
    }

    #[test]
    fn non_ascii_input_is_safe() {
        assert!(!contains_alias("élena ñ", "elena"));
        assert!(contains_alias("ß elena", "elena"));
    }

    #[test]
    fn resolve_counts_each_suspect_once() {
        let roster = vec![
            suspect("marcus", &["marcus", "marcus reid", "viper", "the viper"]),
            suspect("sophia", &["sophia", "emerald widow"]),
            suspect("laura", &["laura", "rachel"]),
        ];
        let found = resolve_mentions("marcus reid, the viper, sophia", &roster);
        assert_eq!(
            found,
            BTreeSet::from(["marcus".to_string(), "sophia".to_string()])
        );
        assert!(resolve_mentions("nobody", &roster).is_empty());
    }
}
