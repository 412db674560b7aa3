use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;

/// Collapse embedded newlines into spaces and trim the ends, the way every
/// collected completion is stored.
pub fn flatten_completion(text: &str) -> String {
    text.trim().replace("\r\n", " ").replace('\n', " ")
}

/// One whitespace-separated word, measured in characters rather than
/// terminal columns so CJK text wraps at the same count as Latin text.
#[derive(Debug)]
struct CharWord<'a> {
    text: &'a str,
    chars: usize,
}

impl Fragment for CharWord<'_> {
    fn width(&self) -> f64 {
        self.chars as f64
    }

    fn whitespace_width(&self) -> f64 {
        1.0
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Splits `word` into pieces of at most `width` characters.
fn char_chunks(word: &str, width: usize) -> Vec<CharWord<'_>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut chars = 0;
    for (pos, _) in word.char_indices() {
        if chars == width {
            chunks.push(CharWord { text: &word[start..pos], chars });
            start = pos;
            chars = 0;
        }
        chars += 1;
    }
    if chars > 0 {
        chunks.push(CharWord { text: &word[start..], chars });
    }
    chunks
}

/// Word-wrap `text` to at most `width` characters per line. Runs of
/// whitespace, including line breaks, count as a single space; words longer
/// than the width are broken.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let words: Vec<CharWord> = text
        .split_whitespace()
        .flat_map(|word| char_chunks(word, width))
        .collect();
    wrap_first_fit(&words, &[width as f64])
        .into_iter()
        .map(|line| {
            line.iter()
                .map(|word| word.text)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// [`wrap_lines`] joined with `\n`.
pub fn wrap_block(text: &str, width: usize) -> String {
    wrap_lines(text, width).join("\n")
}
