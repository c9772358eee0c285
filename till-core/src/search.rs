/// Case-insensitive containment, the in-memory counterpart of Postgres
/// `ILIKE '%term%'` so a search behaves the same on both backends.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when any of the fields contains the term, case-insensitively.
pub fn matches_any<'a, I>(term: &str, fields: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    fields.into_iter().any(|field| contains_ci(field, term))
}
