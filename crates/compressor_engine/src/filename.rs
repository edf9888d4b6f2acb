/// Extracts the suggested filename from a `Content-Disposition` header value.
///
/// Accepts `filename="name"` and `filename=name`. The first occurrence with a
/// non-empty value wins; the value ends at the next `"` or `;`.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    const KEY: &str = "filename=";
    let mut rest = header;
    while let Some(idx) = rest.find(KEY) {
        let after = &rest[idx + KEY.len()..];
        let value = after.strip_prefix('"').unwrap_or(after);
        let end = value.find(['"', ';']).unwrap_or(value.len());
        if end > 0 {
            return Some(value[..end].to_string());
        }
        rest = after;
    }
    None
}

/// Reduces a download name to something safe to create inside the download
/// directory: final path component only, forbidden characters replaced.
pub fn sanitize_download_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let mut cleaned = cleaned.trim_matches(&[' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "download".to_string();
    }
    let stem = cleaned.split('.').next().unwrap_or(&cleaned);
    if is_reserved_windows_name(stem) {
        cleaned.insert(stem.len(), '_');
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
