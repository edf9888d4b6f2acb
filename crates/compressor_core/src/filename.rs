use crate::ActionKind;

/// Marker inserted into download names when the server does not suggest one.
pub const COMPRESSED_SUFFIX: &str = "_comprimido";

/// Download name used when the response carries no `Content-Disposition` filename.
///
/// PDFs replace the first literal `.pdf` (case-sensitive) with `_comprimido.pdf`.
/// Images get the suffix inserted before the final extension; a name without
/// an extension is returned unchanged.
pub fn fallback_download_name(kind: ActionKind, original: &str) -> String {
    match kind {
        ActionKind::Pdf => original.replacen(".pdf", &format!("{COMPRESSED_SUFFIX}.pdf"), 1),
        ActionKind::Image => match original.rfind('.') {
            Some(dot) if dot + 1 < original.len() => {
                let (stem, ext) = original.split_at(dot);
                format!("{stem}{COMPRESSED_SUFFIX}{ext}")
            }
            _ => original.to_string(),
        },
    }
}
