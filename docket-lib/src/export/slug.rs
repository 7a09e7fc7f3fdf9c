//! File names derived from export titles.

/// Lowercases `title` and collapses every run of non-alphanumeric
/// characters into a single `-`. Falls back to `export` when nothing is left.
///
/// # Example
///
/// ```
/// use docket_lib::export::slugify;
///
/// assert_eq!(slugify("Active Clients (Q3 2024)"), "active-clients-q3-2024");
/// assert_eq!(slugify("  ***  "), "export");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "export".to_string()
    } else {
        slug
    }
}

/// `<slug>.csv`
pub fn csv_file_name(title: &str) -> String {
    format!("{}.csv", slugify(title))
}

/// `<slug>.html`
pub fn print_file_name(title: &str) -> String {
    format!("{}.html", slugify(title))
}
