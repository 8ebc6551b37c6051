//! Splitting path lines into segments and merging them into a nested map.

use hashlink::LinkedHashMap;

/// Path separator used to split input lines.
pub const SEPARATOR: char = '/';

/// Insertion-ordered mapping from segment label to the segments below it.
///
/// An empty map at a key marks a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestedPathMap(LinkedHashMap<String, NestedPathMap>);

impl NestedPathMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one path's segments into the map, reusing existing prefixes.
    pub fn insert_segments<I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut node = self;
        for segment in segments {
            node = node.0.entry(segment).or_insert_with(NestedPathMap::new);
        }
    }

    pub fn get(&self, label: &str) -> Option<&NestedPathMap> {
        self.0.get(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NestedPathMap)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Parse raw input lines into a nested map.
///
/// Nothing is normalized: `.`, `..`, empty segments and embedded newline
/// characters all become literal keys.
pub fn parse<I, S>(lines: I) -> NestedPathMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = NestedPathMap::new();
    for line in lines {
        map.insert_segments(split_path(line.as_ref()));
    }
    map
}

/// Split a path into all of its segments, root first.
///
/// Repeatedly peels the last component off until the remaining head is a
/// fixed point (an absolute root like `/`, or the empty string) or the tail
/// is the whole remaining path (relative path exhausted). That final piece
/// becomes the first segment.
pub fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut rest = path;
    loop {
        let (head, tail) = split_last(rest);
        if head == rest {
            segments.push(head);
            break;
        }
        if tail == rest {
            segments.push(tail);
            break;
        }
        segments.push(tail);
        rest = head;
    }
    segments.reverse();
    segments.into_iter().map(str::to_owned).collect()
}

/// Split at the last separator. Trailing separators are stripped from the
/// head unless the head consists only of separators.
fn split_last(path: &str) -> (&str, &str) {
    let at = path.rfind(SEPARATOR).map_or(0, |i| i + SEPARATOR.len_utf8());
    let (head, tail) = path.split_at(at);
    if head.chars().any(|c| c != SEPARATOR) {
        (head.trim_end_matches(SEPARATOR), tail)
    } else {
        (head, tail)
    }
}
