/// Collapse multi-line text into one line: every line trimmed, blank lines
/// dropped, the rest joined with single spaces.
///
/// Used for OCR output, for translation cache keys and network queries, and
/// for the backend's reply, so all three agree on what "the same text" is.
pub fn collapse_lines(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
