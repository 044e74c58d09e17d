//! Raw content regions excluded from template scanning.

use htmllint_ast::Span;

/// Returns the content ranges of every raw content element named in `tags`,
/// sorted by start.
///
/// Tag names match ASCII case-insensitively. The content of an element runs
/// from the end of `<name ...>` to the next `</name`, or to the end of the
/// text when the element is never closed.
pub fn raw_content_ranges(text: &str, tags: &[String]) -> Vec<Span> {
    if tags.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_ascii_lowercase();
    let mut ranges = Vec::new();

    for tag in tags {
        let tag = tag.to_ascii_lowercase();
        if tag.is_empty() {
            continue;
        }
        let open = format!("<{tag}");
        let close = format!("</{tag}");

        let mut from = 0;
        while let Some(start) = find_tag(&lowered, &open, from) {
            let Some(gt) = lowered[start..].find('>') else {
                break;
            };
            let content_start = start + gt + 1;
            let content_end = lowered[content_start..]
                .find(&close)
                .map_or(lowered.len(), |position| content_start + position);

            ranges.push(Span::new(content_start as u32, content_end as u32));
            from = content_end;
        }
    }

    ranges.sort_by_key(|range| range.start);
    ranges
}

/// Finds `<name` followed by whitespace, `/` or `>`.
fn find_tag(haystack: &str, open: &str, from: usize) -> Option<usize> {
    let mut from = from;
    while let Some(position) = haystack.get(from..)?.find(open) {
        let start = from + position;
        let next = haystack.as_bytes().get(start + open.len());
        if matches!(next, Some(byte) if byte.is_ascii_whitespace() || *byte == b'>' || *byte == b'/')
        {
            return Some(start);
        }
        from = start + open.len();
    }
    None
}
