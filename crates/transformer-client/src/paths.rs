//! Delivery URL assembly

use crate::transform::Transformations;

/// Build the delivery URL for an asset.
///
/// `stash` is accepted for compatibility but does not appear in the result.
/// Runs of `/` collapse into one (the `//` after a URL scheme is kept) and
/// trailing slashes are removed, so an empty transformation set leaves no
/// dangling separator.
pub fn delivery_url(
    base: &str,
    _stash: &str,
    folder: &str,
    identifier: &str,
    transformations: &Transformations,
) -> String {
    let url = format!(
        "{}/{}/{}/{}",
        base,
        folder,
        identifier,
        transformations.segment()
    );

    collapse_slashes(&url).trim_end_matches('/').to_string()
}

/// Collapse every run of consecutive `/` into a single one, leaving the
/// authority separator of an absolute URL intact.
pub fn collapse_slashes(url: &str) -> String {
    let (scheme, rest) = match url.find("://") {
        Some(idx) if is_scheme(&url[..idx]) => url.split_at(idx + 3),
        _ => ("", url),
    };

    let mut out = String::with_capacity(url.len());
    out.push_str(scheme);

    let mut previous_slash = false;
    for c in rest.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(c);
    }

    out
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
