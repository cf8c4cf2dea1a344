use std::sync::LazyLock;

use regex::Regex;

use crate::signals::word_count;

/// Paragraph markers `(a)`, `a.`, `a)`, `1.` followed by whitespace and a capitalized word.
///
/// Bare letter markers are lowercase only; "Appendix B. The" is prose.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(\(([A-Za-z0-9]{1,3})\)|([a-z]|\d{1,2})[.)])\s+[A-Z]")
        .expect("paragraph marker pattern is valid")
});

/// A paragraph-level slice of a section's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Marker label without punctuation (`"a"` for `"(a)"`); `None` for unmarked text.
    pub label: Option<&'a str>,
    pub text: &'a str,
}

/// Splits `text` at paragraph markers.
///
/// Text without markers is a single unlabeled segment; blank text has no segments. Text
/// before the first marker becomes an unlabeled segment only if it has at least
/// `min_preamble_words` words.
pub fn segment_text(text: &str, min_preamble_words: usize) -> Vec<Segment<'_>> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let markers: Vec<(usize, &str)> = MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let start = caps.get(1)?.start();
            let label = caps.get(2).or_else(|| caps.get(3))?.as_str();
            Some((start, label))
        })
        .collect();

    let Some(&(first_start, _)) = markers.first() else {
        return vec![Segment {
            label: None,
            text: text.trim(),
        }];
    };

    let mut segments = Vec::with_capacity(markers.len() + 1);

    let preamble = text[..first_start].trim();
    if !preamble.is_empty() && word_count(preamble) >= min_preamble_words {
        segments.push(Segment {
            label: None,
            text: preamble,
        });
    }

    for (i, &(start, label)) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map_or(text.len(), |&(next, _)| next);
        let body = text[start..end].trim();
        if !body.is_empty() {
            segments.push(Segment {
                label: Some(label),
                text: body,
            });
        }
    }

    segments
}
