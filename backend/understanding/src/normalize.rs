//! Normalizer: turns free-text model output into an ordered list of names.
//!
//! Each line first loses its parenthesized annotations (nested groups
//! included), then is split on commas. Leading `1.`-style enumeration markers
//! are stripped and pieces that end up empty are dropped.
//! Duplicates are kept, in source order.

use once_cell::sync::Lazy;
use regex::Regex;

static ENUMERATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Parse an upstream reply into candidate pokemon names.
pub fn parse_pokemon_names(text: &str) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| {
            strip_parentheticals(line)
                .split(',')
                .filter_map(normalize_line)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Normalize one candidate line; `None` when nothing is left.
pub fn normalize_line(line: &str) -> Option<String> {
    let without_notes = strip_parentheticals(line);
    let without_marker = ENUMERATION_RE.replace(without_notes.trim(), "");
    let name = without_marker.trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Remove every balanced `( ... )` group, however deeply nested, then any
/// unmatched bracket left behind.
fn strip_parentheticals(line: &str) -> String {
    let mut removed = vec![false; line.len()];
    let mut open = Vec::new();

    for (i, c) in line.char_indices() {
        match c {
            '(' => open.push(i),
            ')' => {
                if let Some(start) = open.pop() {
                    removed[start..=i].iter_mut().for_each(|r| *r = true);
                }
            }
            _ => {}
        }
    }

    line.char_indices()
        .filter(|&(i, c)| !removed[i] && c != '(' && c != ')')
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parenthetical() {
        assert_eq!(parse_pokemon_names("Pikachu (Electric)"), ["Pikachu"]);
    }

    #[test]
    fn strips_enumeration_marker() {
        assert_eq!(parse_pokemon_names("1. Bulbasaur"), ["Bulbasaur"]);
    }

    #[test]
    fn drops_blank_lines() {
        assert_eq!(parse_pokemon_names("\n\nPikachu\n\n"), ["Pikachu"]);
        assert!(parse_pokemon_names("   \n \t\n").is_empty());
        assert!(parse_pokemon_names("").is_empty());
    }

    #[test]
    fn splits_on_commas_and_newlines() {
        let names = parse_pokemon_names("Squirtle, Wartortle\nBlastoise");
        assert_eq!(names, ["Squirtle", "Wartortle", "Blastoise"]);
    }

    #[test]
    fn handles_numbered_list_with_notes() {
        let reply = "1. Charmander (Fire type)\n2. Vulpix (Fire)\n3. Growlithe\n\n10. Ponyta (fast runner)";
        let names = parse_pokemon_names(reply);
        assert_eq!(names, ["Charmander", "Vulpix", "Growlithe", "Ponyta"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let names = parse_pokemon_names("Ditto\nMew\nDitto");
        assert_eq!(names, ["Ditto", "Mew", "Ditto"]);
    }

    #[test]
    fn line_of_only_annotation_is_dropped() {
        assert_eq!(normalize_line("(none)"), None);
        assert_eq!(normalize_line("3. "), None);
    }

    #[test]
    fn strips_nested_parentheticals() {
        assert_eq!(parse_pokemon_names("Pikachu (Electric (mouse))"), ["Pikachu"]);
        assert_eq!(
            normalize_line("1. Eevee (Normal (evolves (many ways)))").as_deref(),
            Some("Eevee")
        );
    }

    #[test]
    fn commas_inside_annotations_do_not_split() {
        assert_eq!(
            parse_pokemon_names("Clefairy (Fairy, Normal), Jigglypuff"),
            ["Clefairy", "Jigglypuff"]
        );
        assert_eq!(
            parse_pokemon_names("1. Clefairy (Fairy, Normal)\n2. Togepi"),
            ["Clefairy", "Togepi"]
        );
    }

    #[test]
    fn unmatched_brackets_are_dropped() {
        assert_eq!(normalize_line("Snorlax )").as_deref(), Some("Snorlax"));
        assert_eq!(normalize_line("Lapras (Water").as_deref(), Some("Lapras Water"));
    }

    #[test]
    fn keeps_names_with_inner_digits() {
        assert_eq!(normalize_line("Porygon2").as_deref(), Some("Porygon2"));
        assert_eq!(normalize_line("2. Mr. Mime").as_deref(), Some("Mr. Mime"));
    }
}
