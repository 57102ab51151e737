//! Entity highlighting: splits document text into plain and tagged segments.
//!
//! Occurrences are located by exhaustive, case-sensitive substring search
//! (or taken from backend-resolved positions), ordered by start offset and
//! emitted with a cursor. An occurrence that starts inside an already
//! tagged span is dropped, so tagged segments never overlap. Concatenating
//! the segments always reproduces the input text.

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::services::entities::{CategoryEntities, EntityMap, EntityOccurrence};
use crate::services::styles::{canonical_category, CategoryStyles};

/// A contiguous piece of the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Tagged {
        text: String,
        category: String,
        style: String,
    },
    Plain {
        text: String,
    },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Tagged { text, .. } | Segment::Plain { text } => text,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Segment::Tagged { category, .. } => Some(category.as_str()),
            Segment::Plain { .. } => None,
        }
    }

    pub fn style(&self) -> Option<&str> {
        match self {
            Segment::Tagged { style, .. } => Some(style.as_str()),
            Segment::Plain { .. } => None,
        }
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, Segment::Tagged { .. })
    }
}

/// Ordered segments covering the whole document text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segmentation {
    segments: Vec<Segment>,
}

impl Segmentation {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Concatenated segment text.
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    pub fn tagged(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_tagged())
    }

    /// Distinct tagged categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.segments
            .iter()
            .filter_map(Segment::category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Character ranges of tagged segments within the segmented text.
    pub fn tagged_ranges(&self) -> Vec<(Range<usize>, &str)> {
        let mut ranges = Vec::new();
        let mut offset = 0;
        for segment in &self.segments {
            let len = segment.text().chars().count();
            if let Some(category) = segment.category() {
                ranges.push((offset..offset + len, category));
            }
            offset += len;
        }
        ranges
    }
}

/// Ordered occurrences for a text and entity map.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceSet {
    pub occurrences: Vec<EntityOccurrence>,
    pub rejected: Vec<InputError>,
}

impl OccurrenceSet {
    /// Number of occurrences per category, in order of first occurrence.
    pub fn counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for occurrence in &self.occurrences {
            match counts.iter_mut().find(|(c, _)| *c == occurrence.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((occurrence.category.as_str(), 1)),
            }
        }
        counts
    }

    pub fn count_for(&self, category: &str) -> usize {
        self.occurrences
            .iter()
            .filter(|o| o.category == category)
            .count()
    }
}

/// Byte/char offset translation for one text.
struct CharOffsets {
    /// Byte offset of each char, followed by the text length.
    boundaries: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { boundaries }
    }

    fn to_byte(&self, char_offset: usize) -> Option<usize> {
        self.boundaries.get(char_offset).copied()
    }

    fn to_char(&self, byte_offset: usize) -> usize {
        self.boundaries
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i)
    }
}

/// An occurrence located by byte range, borrowing from the inputs.
#[derive(Debug, Clone, Copy)]
struct Located<'a> {
    category: &'a str,
    surface: &'a str,
    start: usize,
    end: usize,
}

/// Builds segmentations using a category style registry.
#[derive(Debug, Clone, Default)]
pub struct EntityHighlighter {
    styles: CategoryStyles,
}

impl EntityHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_styles(styles: CategoryStyles) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &CategoryStyles {
        &self.styles
    }

    /// All occurrences of the map's entities, sorted by start offset.
    pub fn occurrences(&self, text: &str, entity_map: &EntityMap) -> OccurrenceSet {
        let offsets = CharOffsets::new(text);
        let (located, rejected) = locate_all(text, entity_map, &offsets);

        let occurrences = located
            .into_iter()
            .map(|loc| EntityOccurrence {
                category: loc.category.to_string(),
                surface_text: loc.surface.to_string(),
                start_offset: offsets.to_char(loc.start),
                end_offset: offsets.to_char(loc.end),
            })
            .collect();

        OccurrenceSet {
            occurrences,
            rejected,
        }
    }

    /// Split `text` into segments, tagging entity spans.
    ///
    /// With `active_category` set, only spans of that category (after alias
    /// resolution) are tagged; all other text stays plain.
    pub fn segment(
        &self,
        text: &str,
        entity_map: &EntityMap,
        active_category: Option<&str>,
    ) -> Segmentation {
        if text.is_empty() || entity_map.is_empty() {
            return Segmentation {
                segments: vec![Segment::Plain {
                    text: text.to_string(),
                }],
            };
        }

        let offsets = CharOffsets::new(text);
        let (located, _rejected) = locate_all(text, entity_map, &offsets);
        let active = active_category.map(canonical_category);

        let mut segments = Vec::new();
        let mut cursor = 0;

        for loc in located {
            if active.is_some_and(|a| canonical_category(loc.category) != a) {
                continue;
            }
            if loc.start < cursor {
                continue;
            }
            if loc.start > cursor {
                segments.push(Segment::Plain {
                    text: text[cursor..loc.start].to_string(),
                });
            }
            segments.push(Segment::Tagged {
                text: text[loc.start..loc.end].to_string(),
                category: canonical_category(loc.category).to_string(),
                style: self.styles.style_key(loc.category),
            });
            cursor = loc.end;
        }

        if cursor < text.len() {
            segments.push(Segment::Plain {
                text: text[cursor..].to_string(),
            });
        }

        Segmentation { segments }
    }
}

/// Convenience function: segment with the default style registry.
pub fn segment(text: &str, entity_map: &EntityMap, active_category: Option<&str>) -> Segmentation {
    EntityHighlighter::new().segment(text, entity_map, active_category)
}

/// Locate every occurrence, then stable-sort by start so that ties keep
/// category-then-surface encounter order.
fn locate_all<'a>(
    text: &'a str,
    entity_map: &'a EntityMap,
    offsets: &CharOffsets,
) -> (Vec<Located<'a>>, Vec<InputError>) {
    let mut located = Vec::new();
    let mut rejected = Vec::new();

    for (category, entities) in entity_map.iter() {
        match entities {
            CategoryEntities::Surfaces(surfaces) => {
                for surface in surfaces {
                    find_surface(text, category, surface, &mut located);
                }
            }
            CategoryEntities::Occurrences(occurrences) => {
                match resolve_occurrences(text, category, occurrences, offsets) {
                    Ok(mut resolved) => located.append(&mut resolved),
                    Err(e) => {
                        tracing::warn!("Skipping entity category during highlighting: {}", e);
                        rejected.push(e);
                    }
                }
            }
        }
    }

    located.sort_by_key(|loc| loc.start);
    tracing::debug!(
        "Located {} entity occurrences across {} categories",
        located.len(),
        entity_map.len()
    );

    (located, rejected)
}

/// Find every match of `surface`, resuming one character after each match
/// start so overlapping matches of the same string are all found.
fn find_surface<'a>(
    text: &'a str,
    category: &'a str,
    surface: &'a str,
    located: &mut Vec<Located<'a>>,
) {
    if surface.is_empty() {
        return;
    }

    let mut from = 0;
    while let Some(pos) = text[from..].find(surface) {
        let start = from + pos;
        located.push(Located {
            category,
            surface,
            start,
            end: start + surface.len(),
        });
        from = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }
}

fn resolve_occurrences<'a>(
    text: &str,
    category: &'a str,
    occurrences: &'a [EntityOccurrence],
    offsets: &CharOffsets,
) -> Result<Vec<Located<'a>>, InputError> {
    occurrences
        .iter()
        .map(|occ| {
            let out_of_range = || {
                InputError::category(
                    category,
                    format!(
                        "offsets {}..{} of '{}' are outside the text",
                        occ.start_offset, occ.end_offset, occ.surface_text
                    ),
                )
            };
            let start = offsets.to_byte(occ.start_offset).ok_or_else(out_of_range)?;
            let end = offsets.to_byte(occ.end_offset).ok_or_else(out_of_range)?;

            if occ.surface_text.is_empty() || start >= end {
                return Err(InputError::category(category, "empty entity span"));
            }
            if text[start..end] != occ.surface_text {
                return Err(InputError::category(
                    category,
                    format!(
                        "text at {}..{} does not match '{}'",
                        occ.start_offset, occ.end_offset, occ.surface_text
                    ),
                ));
            }

            Ok(Located {
                category,
                surface: &occ.surface_text,
                start,
                end,
            })
        })
        .collect()
}
