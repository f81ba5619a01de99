//! Slug normalization for trait and ability names.
//!
//! Names come from user-editable catalogs, so the same trait may be typed
//! as `Nieporęczny`, `nieporeczny` or `NIEPORĘCZNY `. All of them fold to
//! the slug `nieporeczny`.

/// Fold a Polish letter with a diacritic onto its ASCII base letter.
///
/// Characters without a known folding are returned unchanged.
#[must_use]
pub const fn fold_diacritic(c: char) -> char {
    match c {
        'ą' | 'Ą' => 'a',
        'ć' | 'Ć' => 'c',
        'ę' | 'Ę' => 'e',
        'ł' | 'Ł' => 'l',
        'ń' | 'Ń' => 'n',
        'ó' | 'Ó' => 'o',
        'ś' | 'Ś' => 's',
        'ź' | 'Ź' | 'ż' | 'Ż' => 'z',
        other => other,
    }
}

/// Normalize a display name into a slug.
///
/// Diacritics are stripped, letters are lowercased, and runs of
/// whitespace, `-` or `_` collapse into a single `_`. Leading and
/// trailing separators are dropped.
///
/// ```
/// use armory_core::slug::normalize_slug;
///
/// assert_eq!(normalize_slug("Nieporęczny"), "nieporeczny");
/// assert_eq!(normalize_slug("  Szał  Bitewny "), "szal_bitewny");
/// ```
#[must_use]
pub fn normalize_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = !slug.is_empty();
            continue;
        }
        if pending_separator {
            slug.push('_');
            pending_separator = false;
        }
        slug.extend(fold_diacritic(c).to_lowercase());
    }

    slug
}
