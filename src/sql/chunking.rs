//! Column chunking
//!
//! Column names and value bindings are laid out two at a time, each chunk
//! indented by two spaces, every chunk but the last ending in a comma. The
//! pairing only affects line wrapping; [`ChunkLayout::Flat`] produces a
//! single segment with the same SQL.

use serde::{Deserialize, Serialize};

const CHUNK_PREFIX: &str = "  ";
const PAIR: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkLayout {
    /// Two items per segment, byte-compatible with existing SQL maps
    #[default]
    Pairs,
    /// One segment holding every item
    Flat,
}

/// Render `items` into text segments according to `layout`.
///
/// Yields `ceil(N / 2)` segments for [`ChunkLayout::Pairs`] and one for
/// [`ChunkLayout::Flat`]; no segments for an empty slice.
pub fn chunk<T>(items: &[T], layout: ChunkLayout, render: impl Fn(&T) -> String) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let size = match layout {
        ChunkLayout::Pairs => PAIR,
        ChunkLayout::Flat => items.len(),
    };

    let mut segments = Vec::with_capacity(items.len().div_ceil(size));
    let mut start = 0;
    while start < items.len() {
        let rest = items.len() - start;
        let end = start + rest.min(size);
        let joined: Vec<String> = items[start..end].iter().map(&render).collect();
        let separator = if rest > size { "," } else { "" };
        segments.push(format!("{CHUNK_PREFIX}{}{separator}", joined.join(",")));
        start = end;
    }
    segments
}
