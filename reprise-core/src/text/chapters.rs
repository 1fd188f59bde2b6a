//! Chapter boundaries of a reference text

use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based chapter number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chapter(pub usize);

impl Chapter {
    /// Chapter number as an integer
    pub fn number(self) -> usize {
        self.0
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered byte offsets at which chapters start
///
/// The first chapter always starts at offset 0, even when a marker opens the
/// text; the empty leading chapter still counts. An offset equal to a
/// boundary belongs to the chapter that the boundary opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterIndex {
    starts: Vec<usize>,
}

impl Default for ChapterIndex {
    fn default() -> Self {
        Self::single()
    }
}

impl ChapterIndex {
    /// Single implicit chapter spanning the whole text
    pub fn single() -> Self {
        Self { starts: vec![0] }
    }

    /// Build from marker offsets in any order
    ///
    /// Duplicate offsets collapse. The implicit first chapter at 0 is always
    /// kept, so a marker at offset 0 opens chapter 2.
    pub fn from_offsets(offsets: impl IntoIterator<Item = usize>) -> Self {
        let mut markers: Vec<usize> = offsets.into_iter().collect();
        markers.sort_unstable();
        markers.dedup();

        let mut starts = Vec::with_capacity(markers.len() + 1);
        starts.push(0);
        starts.extend(markers);
        Self { starts }
    }

    /// Number of chapters
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Always false; an index holds at least one chapter
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Chapter start offsets
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Chapter containing `offset`
    pub fn chapter_at(&self, offset: usize) -> Chapter {
        Chapter(self.starts.partition_point(|&start| start <= offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chapter() {
        let index = ChapterIndex::single();
        assert_eq!(index.len(), 1);
        assert_eq!(index.chapter_at(0), Chapter(1));
        assert_eq!(index.chapter_at(1_000_000), Chapter(1));
    }

    #[test]
    fn test_boundary_belongs_to_opened_chapter() {
        let index = ChapterIndex::from_offsets([100, 250]);
        assert_eq!(index.chapter_at(99), Chapter(1));
        assert_eq!(index.chapter_at(100), Chapter(2));
        assert_eq!(index.chapter_at(249), Chapter(2));
        assert_eq!(index.chapter_at(250), Chapter(3));
    }

    #[test]
    fn test_from_offsets_normalizes() {
        let index = ChapterIndex::from_offsets([50, 50, 10]);
        assert_eq!(index.starts(), &[0, 10, 50]);
    }

    #[test]
    fn test_marker_at_start_keeps_empty_first_chapter() {
        let index = ChapterIndex::from_offsets([30, 0]);
        assert_eq!(index.starts(), &[0, 0, 30]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.chapter_at(0), Chapter(2));
        assert_eq!(index.chapter_at(29), Chapter(2));
        assert_eq!(index.chapter_at(30), Chapter(3));
    }

    #[test]
    fn test_chapter_display() {
        assert_eq!(Chapter(7).to_string(), "7");
        assert_eq!(Chapter(7).number(), 7);
    }
}
