//! Boundary adapter for the free-text flag and tag mini-syntax.
//!
//! Stored catalogs keep unit flags and weapon tags as comma-separated text:
//!
//! ```text
//! Nieustraszony, Strach(2), Okopany!, Wojownik?, Strzelec?
//! Rozprysk(3), Szturmowy, Przeciążenie
//! ```
//!
//! - `Name(X)` or `Name[X]` carries a parameter; commas inside brackets do
//!   not split tokens, so `Strach(1,5)` is one token with value 1.5.
//! - A trailing `!` marks a mandatory trait that loadouts cannot disable.
//! - A trailing `?` marks a trait the unit may carry but that starts off.
//!
//! Pricing code never sees these strings, only the parsed entries.

use crate::registry::TraitRegistry;
use crate::traits::{PassiveTraitEntry, TraitValue, WeaponTrait};

/// One token of the mini-syntax before slug resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RawToken {
    /// Name as typed, trimmed.
    pub name: String,
    /// Bracketed parameter, if any.
    pub value: Option<TraitValue>,
    /// `!` marker present.
    pub mandatory: bool,
    /// `?` marker present.
    pub optional: bool,
}

/// Split on commas that are not inside brackets.
#[must_use]
pub fn split_tokens(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                tokens.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    tokens.push(&input[start..]);

    tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse a single token. Returns `None` when it has no name.
#[must_use]
pub fn parse_token(token: &str) -> Option<RawToken> {
    let mut name = String::new();
    let mut param = String::new();
    let mut depth = 0usize;
    let mut seen_bracket = false;
    let mut mandatory = false;
    let mut optional = false;

    for c in token.chars() {
        match c {
            '(' | '[' => {
                if depth > 0 {
                    param.push(c);
                }
                depth += 1;
                seen_bracket = true;
            }
            ')' | ']' if depth > 0 => {
                depth -= 1;
                if depth > 0 {
                    param.push(c);
                }
            }
            ')' | ']' => {}
            _ if depth > 0 => param.push(c),
            '!' => mandatory = true,
            '?' => optional = true,
            _ if !seen_bracket => name.push(c),
            _ => {}
        }
    }

    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    Some(RawToken {
        name: name.to_string(),
        value: TraitValue::parse(&param),
        mandatory,
        optional,
    })
}

/// Parse a unit flag string into passive trait entries.
///
/// Duplicate slugs keep the first occurrence.
#[must_use]
pub fn parse_flags(input: &str, registry: &TraitRegistry) -> Vec<PassiveTraitEntry> {
    let mut entries: Vec<PassiveTraitEntry> = Vec::new();

    for token in split_tokens(input).into_iter().filter_map(parse_token) {
        let slug = registry.canonical(&token.name);
        if slug.is_empty() || entries.iter().any(|e| e.slug == slug) {
            tracing::debug!(token = %token.name, "Skipping duplicate or empty flag");
            continue;
        }

        let mut entry = PassiveTraitEntry::new(slug, token.name);
        entry.value = token.value;
        if token.mandatory {
            entry = entry.mandatory();
        } else if token.optional {
            entry = entry.optional_off();
        }
        entries.push(entry);
    }

    entries
}

/// Parse a weapon tag string into weapon traits.
#[must_use]
pub fn parse_weapon_tags(input: &str, registry: &TraitRegistry) -> Vec<WeaponTrait> {
    split_tokens(input)
        .into_iter()
        .filter_map(parse_token)
        .filter_map(|token| {
            let slug = registry.canonical(&token.name);
            if slug.is_empty() {
                return None;
            }
            let mut tag = WeaponTrait::new(slug, token.name);
            tag.value = token.value;
            Some(tag)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rulebook::Rulebook;

    fn registry() -> &'static TraitRegistry {
        &Rulebook::standard().registry
    }

    #[test]
    fn test_split_tokens_respects_brackets() {
        assert_eq!(
            split_tokens("Strach(1,5), Okopany ,, Rozprysk[3]"),
            vec!["Strach(1,5)", "Okopany", "Rozprysk[3]"]
        );
        assert!(split_tokens("").is_empty());
        assert!(split_tokens(" , ").is_empty());
    }

    #[test]
    fn test_parse_token_markers_and_value() {
        let token = parse_token("Strach(2)!").expect("token");
        assert_eq!(token.name, "Strach");
        assert_eq!(token.value, Some(TraitValue::Number(2.0)));
        assert!(token.mandatory);
        assert!(!token.optional);

        let token = parse_token("Wojownik?").expect("token");
        assert_eq!(token.name, "Wojownik");
        assert_eq!(token.value, None);
        assert!(token.optional);
    }

    #[test]
    fn test_parse_token_decimal_comma_and_text() {
        let token = parse_token("Strach(1,5)").expect("token");
        assert_eq!(token.value, Some(TraitValue::Number(1.5)));

        let token = parse_token("Wróg[Piechota]").expect("token");
        assert_eq!(token.value, Some(TraitValue::Text("Piechota".to_string())));
    }

    #[test]
    fn test_parse_token_rejects_nameless() {
        assert_eq!(parse_token("(3)"), None);
        assert_eq!(parse_token("  !"), None);
    }

    #[test]
    fn test_parse_flags() {
        let entries = parse_flags(
            "Nieustraszony, Okopany!, Wojownik?, Strzelec?, nieustraszony",
            registry(),
        );

        let slugs: Vec<&str> = entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["nieustraszony", "okopany", "warrior", "shooter"]);

        assert!(entries[0].is_default && !entries[0].is_mandatory);
        assert!(entries[1].is_mandatory);
        assert!(!entries[2].is_default);
        assert_eq!(entries[2].label, "Wojownik");
    }

    #[test]
    fn test_parse_weapon_tags_resolves_aliases() {
        let tags = parse_weapon_tags("Blast(3), Assault, Przeciążenie", registry());
        let slugs: Vec<&str> = tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rozprysk", "szturmowy", "przeciazenie"]);
        assert_eq!(tags[0].number(), Some(3.0));
        assert_eq!(tags[0].label, "Blast");
    }

    #[test]
    fn test_unknown_tags_are_kept() {
        let tags = parse_weapon_tags("Coś Nowego", registry());
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].slug, "cos_nowego");
    }
}
