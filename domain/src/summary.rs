//! Section splitting for model-written summaries.
//!
//! The summarizer asks for three parts introduced by ①, ② and ③, but the
//! model is free to ignore that. The parser accepts any number of markers in
//! any order and never fails.

pub const SECTION_MARKERS: [char; 3] = ['①', '②', '③'];

/// Splits `text` before every section marker. Each marker stays at the start
/// of the section it introduces; text ahead of the first marker is kept as
/// its own section. Sections are trimmed and blank ones dropped, so a text
/// without markers yields exactly one section (or none if it is blank).
pub fn split_sections(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut start = 0;
    for (pos, ch) in text.char_indices() {
        if pos > start && SECTION_MARKERS.contains(&ch) {
            push_section(&mut sections, &text[start..pos]);
            start = pos;
        }
    }
    push_section(&mut sections, &text[start..]);
    sections
}

fn push_section(sections: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sections.push(trimmed.to_string());
    }
}
