//! Syntactic validation of user-supplied DNS names.

/// Maximum length of a single DNS label.
const MAX_LABEL_LEN: usize = 63;

/// Minimum length of the top-level label.
const MIN_TLD_LEN: usize = 2;

/// Check whether `s` is a syntactically valid DNS domain.
///
/// One or more labels (ASCII letters, digits and hyphens, 1-63 chars, no
/// leading or trailing hyphen) separated by dots, followed by an alphabetic
/// top-level label of at least two characters. Case-insensitive.
pub fn is_valid_domain(s: &str) -> bool {
    let Some((labels, tld)) = s.rsplit_once('.') else {
        return false;
    };

    tld.len() >= MIN_TLD_LEN
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
        && labels.split('.').all(is_valid_label)
}

/// Check whether `s` is a Kubernetes DNS-1123 label (namespaces, app names).
///
/// Same shape as a domain label but restricted to lowercase.
pub fn is_valid_dns_label(s: &str) -> bool {
    is_valid_label(s) && !s.bytes().any(|b| b.is_ascii_uppercase())
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };

    bytes.len() <= MAX_LABEL_LEN
        && first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}
