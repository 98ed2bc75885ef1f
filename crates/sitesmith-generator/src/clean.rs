//! Post-processing of the raw artifact response.

const DOCUMENT_STARTS: [&str; 2] = ["<!doctype", "<html"];
const DOCUMENT_END: &str = "</html>";

/// Extract the document from a raw response.
///
/// The document runs from the first `<!DOCTYPE` (or `<html` when there is no
/// doctype) through the last `</html>`, matched case-insensitively. Without a
/// start marker, surrounding code fences are stripped instead. The result is
/// trimmed and may be empty.
#[must_use]
pub fn clean_document(raw: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `raw`.
    let lower = raw.to_ascii_lowercase();

    let start = DOCUMENT_STARTS
        .iter()
        .find_map(|marker| lower.find(marker));

    match start {
        Some(start) => {
            let end = lower
                .rfind(DOCUMENT_END)
                .map(|i| i + DOCUMENT_END.len())
                .filter(|&end| end > start)
                .unwrap_or(raw.len());
            raw[start..end].trim().to_string()
        }
        None => strip_code_fences(raw),
    }
}

fn strip_code_fences(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (```html) along with the fence.
        text = rest.split_once('\n').map_or("", |(_, body)| body);
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim().to_string()
}
