//! PEM text normalization.
//!
//! Credentials arrive from two directions with two different line
//! disciplines: JSON request bodies carry literal `\n` escape sequences,
//! while wallet stores hold real newlines. Certificate comparison must not
//! care which form it was handed, and some backends additionally store the
//! base64 body without the `-----BEGIN/END CERTIFICATE-----` armor. All
//! comparisons in the workspace go through [`canonical_certificate`].

const BEGIN_CERT: &str = "-----BEGIN CERTIFICATE-----";
const END_CERT: &str = "-----END CERTIFICATE-----";

/// Replace literal `\n` escape sequences with real newlines.
///
/// Request bodies serialize PEM blocks as single-line JSON strings; this
/// restores them to parseable PEM before anything else looks at them.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Reduce a certificate to its canonical single-line form.
///
/// Unescapes `\n` sequences, drops the `BEGIN/END CERTIFICATE` armor if
/// present, and strips every newline and carriage return. Two certificates
/// are the same identity iff their canonical forms are byte-equal.
pub fn canonical_certificate(text: &str) -> String {
    let unescaped = unescape_newlines(text);
    unescaped
        .replace(BEGIN_CERT, "")
        .replace(END_CERT, "")
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect::<String>()
        .trim()
        .to_string()
}
