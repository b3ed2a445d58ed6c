/// Decides whether an href from a listing page is followed or reported
///
/// Rejects, in order:
/// - the root separator itself (`/`)
/// - query variants of the current listing (`?C=M;O=A` sort links)
/// - absolute `http://` and `https://` targets
/// - absolute paths (`/icons/blank.gif`)
///
/// Everything else is a same-directory relative link and passes. Parent
/// references (`../`) are not special-cased.
pub fn passes_filter(href: &str) -> bool {
    href != "/"
        && !href.starts_with('?')
        && !href.starts_with("http://")
        && !href.starts_with("https://")
        && !href.starts_with('/')
}
