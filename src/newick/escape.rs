//! Name escaping for Newick output.

/// Characters that force a name into single quotes.
const SPECIAL: &[char] = &['[', ']', '\'', '"', '(', ')', ',', ':', ';', '_'];

/// Checks if a name is enclosed in single quotes.
///
/// # Examples
/// ```
/// # use treewick::newick::is_quoted;
/// assert_eq!(is_quoted("Pukeko"), false);
/// assert_eq!(is_quoted("'Swamp hen'"), true);
/// ```
pub fn is_quoted(name: &str) -> bool {
    name.starts_with('\'') && name.ends_with('\'') && name.len() >= 2
}

/// Escapes a node name for safe use in Newick output.
///
/// A name already wrapped in single quotes is returned as-is. A name
/// containing any of `[ ] ' " ( ) , : ; _` is wrapped in single quotes with
/// embedded single quotes doubled. Any other name has its spaces replaced
/// with underscores.
///
/// # Examples
/// ```
/// # use treewick::newick::escape_name;
/// assert_eq!(escape_name("Pukeko"), "Pukeko");
/// assert_eq!(escape_name("Australasian Swamphen"), "Australasian_Swamphen");
/// assert_eq!(escape_name("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_name("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_name("'already quoted'"), "'already quoted'");
/// ```
pub fn escape_name(name: &str) -> String {
    if is_quoted(name) {
        return name.to_string();
    }

    if name.contains(SPECIAL) {
        format!("'{}'", name.replace('\'', "''"))
    } else {
        name.replace(' ', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(escape_name("Kakapo"), "Kakapo");
        assert_eq!(escape_name("node42"), "node42");
    }

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(escape_name("Great Spotted Kiwi"), "Great_Spotted_Kiwi");
    }

    #[test]
    fn structural_characters_force_quoting() {
        assert_eq!(escape_name("a:b"), "'a:b'");
        assert_eq!(escape_name("a,b"), "'a,b'");
        assert_eq!(escape_name("(a)"), "'(a)'");
        assert_eq!(escape_name("a;b"), "'a;b'");
        assert_eq!(escape_name("a\"b"), "'a\"b'");
    }

    #[test]
    fn underscore_in_name_forces_quoting() {
        // An unquoted underscore would read back as a space
        assert_eq!(escape_name("under_scored"), "'under_scored'");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(escape_name("it's"), "'it''s'");
    }

    #[test]
    fn quoted_names_are_untouched() {
        assert_eq!(escape_name("'kept as is'"), "'kept as is'");
    }
}
