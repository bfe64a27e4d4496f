// src/core/sanitize.rs

/// Every run of non-word characters becomes one `_`, then lowercase.
/// Word characters are Unicode alphanumerics and `_`. Edges are not trimmed.
pub fn clean_filename(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            out.extend(ch.to_lowercase());
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// `<discipline>-<term>.<ext>`, both parts cleaned.
pub fn output_file_name(discipline: &str, term: &str, ext: &str) -> String {
    format!("{}-{}.{}", clean_filename(discipline), clean_filename(term), ext)
}
