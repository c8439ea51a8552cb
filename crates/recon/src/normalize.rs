/// Collapse a free-text title into its comparison form.
///
/// Lower-cases, then replaces every run of characters that are neither
/// alphabetic nor numeric with a single space and trims. Accented and
/// non-Latin letters are kept, and so are the combining vowel signs Unicode
/// counts as alphabetic, so an Indic word stays one token. Blank input
/// yields an empty string.
pub fn normalize_title(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut last_space = false;

    for ch in lower.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }

    out.trim().to_string()
}
