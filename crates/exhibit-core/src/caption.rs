//! Caption extraction from an image-generation text response
//!
//! The model is asked to lead each caption with `work1`, `work2`, `work3`.
//! Its answers are loose, so any `work<n>:` marker starts a caption and the
//! caption runs until the next marker or the end of the text.

use regex::Regex;
use std::sync::LazyLock;

/// Number of works in one exhibition image
pub const WORKS_PER_EXHIBIT: usize = 3;

const MISSING_CAPTION: &str = "No caption available.";

static WORK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"work\d+:\s*").expect("static caption pattern"));

/// Extract exactly three captions, renumbered in order of appearance
pub fn extract_captions(text: &str) -> [String; WORKS_PER_EXHIBIT] {
    let markers: Vec<_> = WORK_MARKER.find_iter(text).collect();

    let mut captions: Vec<String> = markers
        .iter()
        .enumerate()
        .map(|(idx, marker)| {
            let end = markers
                .get(idx + 1)
                .map(|next| next.start())
                .unwrap_or(text.len());
            format!("work{}: {}", idx + 1, text[marker.end()..end].trim())
        })
        .take(WORKS_PER_EXHIBIT)
        .collect();

    while captions.len() < WORKS_PER_EXHIBIT {
        captions.push(format!("work{}: {}", captions.len() + 1, MISSING_CAPTION));
    }

    std::array::from_fn(|idx| std::mem::take(&mut captions[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_captions_in_order() {
        let text = "Here you go.\nwork1: Vacuum hum\nwork2:   Entangled pets\nwork3: Ghost livestock\n";
        let captions = extract_captions(text);
        assert_eq!(
            captions,
            [
                "work1: Vacuum hum".to_string(),
                "work2: Entangled pets".to_string(),
                "work3: Ghost livestock".to_string(),
            ]
        );
    }

    #[test]
    fn test_captions_are_renumbered() {
        let text = "work7: first\nwork2: second";
        let captions = extract_captions(text);
        assert_eq!(captions[0], "work1: first");
        assert_eq!(captions[1], "work2: second");
        assert_eq!(captions[2], "work3: No caption available.");
    }

    #[test]
    fn test_multiline_caption_body() {
        let text = "work1: a tunnel\nthrough static\n\nwork2: b";
        let captions = extract_captions(text);
        assert_eq!(captions[0], "work1: a tunnel\nthrough static");
    }

    #[test]
    fn test_extra_captions_dropped() {
        let text = "work1: a work2: b work3: c work4: d";
        let captions = extract_captions(text);
        assert_eq!(captions[2], "work3: c");
    }

    #[test]
    fn test_no_markers_fills_placeholders() {
        let captions = extract_captions("Three images about UFOs.");
        for (idx, caption) in captions.iter().enumerate() {
            assert_eq!(*caption, format!("work{}: No caption available.", idx + 1));
        }
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let captions = extract_captions("Work1: upper\nwork1: lower");
        assert_eq!(captions[0], "work1: lower");
        assert_eq!(captions[1], "work2: No caption available.");
    }
}
