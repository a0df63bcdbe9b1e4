//! Name formatting helpers shared by record labels.

/// Builds initials from ordered name parts.
///
/// Each non-empty word contributes its first character, uppercased, followed
/// by a period. Empty words are skipped.
///
/// ```
/// use genbrowse_core::initials;
///
/// assert_eq!(initials(["иван", "ильич"]), "И.И.");
/// assert_eq!(initials(["", "петр"]), "П.");
/// ```
pub fn initials<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for word in words {
        if let Some(first) = word.as_ref().chars().next() {
            out.extend(first.to_uppercase());
            out.push('.');
        }
    }
    out
}

/// Formats `"{surname} {initials}"`, e.g. `"Иванов И.И."`.
pub(crate) fn surname_with_initials(surname: &str, firstname: &str, middlename: &str) -> String {
    format!("{surname} {}", initials([firstname, middlename]))
}
