//! Entity maps supplied by the analysis backend.
//!
//! A backend reports entities as `category → [surface strings]`, optionally
//! with resolved `positions`. This module turns that loosely typed JSON into
//! an ordered `EntityMap`. Category order is preserved because it breaks ties
//! between occurrences that start at the same offset.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::InputError;
use crate::services::styles::canonical_category;

/// One located instance of a surface string in the document text.
///
/// Offsets count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityOccurrence {
    pub category: String,
    pub surface_text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl EntityOccurrence {
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

/// Entities reported for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryEntities {
    /// Surface strings whose occurrences must be located in the text.
    Surfaces(Vec<String>),
    /// Occurrences with offsets already resolved by the backend.
    Occurrences(Vec<EntityOccurrence>),
}

impl CategoryEntities {
    pub fn len(&self) -> usize {
        match self {
            CategoryEntities::Surfaces(s) => s.len(),
            CategoryEntities::Occurrences(o) => o.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct surface strings in encounter order.
    pub fn surfaces(&self) -> Vec<&str> {
        match self {
            CategoryEntities::Surfaces(s) => s.iter().map(String::as_str).collect(),
            CategoryEntities::Occurrences(o) => {
                let mut seen = HashSet::new();
                o.iter()
                    .map(|occ| occ.surface_text.as_str())
                    .filter(|s| seen.insert(*s))
                    .collect()
            }
        }
    }
}

/// Ordered mapping from category to its entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMap {
    categories: Vec<(String, CategoryEntities)>,
}

/// Result of parsing backend entity JSON.
///
/// Categories that could not be interpreted are listed in `rejected`; the
/// remaining categories are still usable.
#[derive(Debug, Clone, Default)]
pub struct ParsedEntityMap {
    pub map: EntityMap,
    pub rejected: Vec<InputError>,
}

/// Per-category overview for entity tables and charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub preview: Vec<String>,
    pub remaining: usize,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append surface strings for a category. Repeated categories keep
    /// their first position in the ordering.
    pub fn with_surfaces<I, S>(mut self, category: &str, surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let surfaces = surfaces.into_iter().map(Into::into).collect();
        self.insert(category, CategoryEntities::Surfaces(surfaces));
        self
    }

    pub fn with_occurrences(mut self, category: &str, occurrences: Vec<EntityOccurrence>) -> Self {
        self.insert(category, CategoryEntities::Occurrences(occurrences));
        self
    }

    /// Insert or replace a category's entities.
    pub fn insert(&mut self, category: &str, entities: CategoryEntities) {
        match self.categories.iter_mut().find(|(c, _)| c == category) {
            Some((_, existing)) => *existing = entities,
            None => self.categories.push((category.to_string(), entities)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&CategoryEntities> {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryEntities)> {
        self.categories.iter().map(|(c, e)| (c.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of entries across all categories.
    pub fn entity_count(&self) -> usize {
        self.categories.iter().map(|(_, e)| e.len()).sum()
    }

    /// Categories a viewer can filter on: aliased, de-duplicated, non-empty,
    /// in encounter order.
    pub fn filter_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .filter(|(_, e)| !e.is_empty())
            .map(|(c, _)| canonical_category(c))
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Entry counts with the first `preview` surface strings per category.
    pub fn summaries(&self, preview: usize) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .filter(|(_, e)| !e.is_empty())
            .map(|(category, entities)| {
                let surfaces = entities.surfaces();
                let shown: Vec<String> = surfaces
                    .iter()
                    .take(preview)
                    .map(|s| s.to_string())
                    .collect();
                CategorySummary {
                    category: category.clone(),
                    count: entities.len(),
                    remaining: surfaces.len().saturating_sub(shown.len()),
                    preview: shown,
                }
            })
            .collect()
    }

    /// Parse backend entity JSON.
    ///
    /// Accepts the extraction envelope `{"entities": {...}, "positions": [...]}`
    /// or a bare `{category: [...]}` map. Only a non-object value is a hard
    /// error; malformed categories are reported in `ParsedEntityMap::rejected`.
    pub fn from_value(value: &Value) -> Result<ParsedEntityMap, InputError> {
        let object = value.as_object().ok_or_else(|| {
            InputError::InvalidEntityMap(format!("expected an object, found {}", kind(value)))
        })?;

        match object.get("entities") {
            Some(Value::Object(entities)) => Ok(parse_envelope(entities, object.get("positions"))),
            _ => Ok(parse_categories(object)),
        }
    }

    /// Parse entity JSON from a string.
    pub fn from_json(json: &str) -> crate::Result<ParsedEntityMap> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }
}

fn parse_categories(object: &Map<String, Value>) -> ParsedEntityMap {
    let mut parsed = ParsedEntityMap::default();

    for (category, value) in object {
        match parse_category(category, value) {
            Ok(entities) => parsed.map.insert(category, entities),
            Err(e) => {
                tracing::warn!("Skipping entity category: {}", e);
                parsed.rejected.push(e);
            }
        }
    }

    parsed
}

fn parse_envelope(entities: &Map<String, Value>, positions: Option<&Value>) -> ParsedEntityMap {
    let mut parsed = parse_categories(entities);

    let positions = match positions {
        None | Some(Value::Null) => return parsed,
        Some(value) => match parse_positions(value) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Ignoring entity positions, deriving from text instead: {}", e);
                parsed.rejected.push(e);
                return parsed;
            }
        },
    };

    if positions.is_empty() {
        return parsed;
    }

    // Group by category in first-seen order; resolved positions replace
    // surface-string derivation for their category.
    let mut grouped: Vec<(String, Vec<EntityOccurrence>)> = Vec::new();
    for occurrence in positions {
        match grouped.iter_mut().find(|(c, _)| *c == occurrence.category) {
            Some((_, list)) => list.push(occurrence),
            None => grouped.push((occurrence.category.clone(), vec![occurrence])),
        }
    }

    let rejected: HashSet<String> = parsed
        .rejected
        .iter()
        .filter_map(|e| e.category_name().map(str::to_string))
        .collect();

    for (category, occurrences) in grouped {
        if rejected.contains(&category) {
            continue;
        }
        parsed
            .map
            .insert(&category, CategoryEntities::Occurrences(occurrences));
    }

    parsed
}

fn parse_category(category: &str, value: &Value) -> Result<CategoryEntities, InputError> {
    let items = value
        .as_array()
        .ok_or_else(|| InputError::category(category, format!("expected an array, found {}", kind(value))))?;

    if items.iter().all(Value::is_string) {
        let surfaces = items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        return Ok(CategoryEntities::Surfaces(surfaces));
    }

    if items.iter().all(Value::is_object) {
        let occurrences = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                occurrence_from_record(category, item).map_err(|reason| {
                    InputError::category(category, format!("entry {}: {}", i, reason))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(CategoryEntities::Occurrences(occurrences));
    }

    Err(InputError::category(
        category,
        "expected an array of strings or of positioned entities",
    ))
}

fn parse_positions(value: &Value) -> Result<Vec<EntityOccurrence>, InputError> {
    let items = value.as_array().ok_or_else(|| {
        InputError::InvalidPositions(format!("expected an array, found {}", kind(value)))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let category = item
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| InputError::InvalidPositions(format!("entry {}: missing 'type'", i)))?;
            occurrence_from_record(category, item)
                .map_err(|reason| InputError::InvalidPositions(format!("entry {}: {}", i, reason)))
        })
        .collect()
}

/// Read a `{text, start, end}` record.
fn occurrence_from_record(category: &str, record: &Value) -> Result<EntityOccurrence, String> {
    let text = record
        .get("text")
        .and_then(Value::as_str)
        .ok_or("missing 'text'")?;
    let start = offset_field(record, "start")?;
    let end = offset_field(record, "end")?;

    if end < start {
        return Err(format!("end {} precedes start {}", end, start));
    }

    Ok(EntityOccurrence {
        category: category.to_string(),
        surface_text: text.to_string(),
        start_offset: start,
        end_offset: end,
    })
}

fn offset_field(record: &Value, field: &str) -> Result<usize, String> {
    record
        .get(field)
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| format!("missing or negative '{}'", field))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category_names(map: &EntityMap) -> Vec<&str> {
        map.iter().map(|(c, _)| c).collect()
    }

    #[test]
    fn test_bare_map_preserves_order() {
        let value = json!({
            "person": ["Alice", "Bob"],
            "organization": ["Acme"],
            "date": ["May 4"],
        });
        let parsed = EntityMap::from_value(&value).unwrap();

        assert!(parsed.rejected.is_empty());
        assert_eq!(category_names(&parsed.map), vec!["person", "organization", "date"]);
        assert_eq!(
            parsed.map.get("person"),
            Some(&CategoryEntities::Surfaces(vec!["Alice".into(), "Bob".into()]))
        );
    }

    #[test]
    fn test_envelope_form() {
        let value = json!({
            "message": "Found 2 named entities in 2 categories.",
            "entities": {"PERSON": ["Alice"], "LOCATION": ["Paris"]},
        });
        let parsed = EntityMap::from_value(&value).unwrap();
        assert_eq!(category_names(&parsed.map), vec!["PERSON", "LOCATION"]);
        assert_eq!(parsed.map.entity_count(), 2);
    }

    #[test]
    fn test_malformed_category_is_skipped() {
        let value = json!({
            "person": ["Alice"],
            "organization": "Acme",
            "date": [1, 2],
            "location": ["Paris"],
        });
        let parsed = EntityMap::from_value(&value).unwrap();

        assert_eq!(category_names(&parsed.map), vec!["person", "location"]);
        assert_eq!(parsed.rejected.len(), 2);
        assert_eq!(parsed.rejected[0].category_name(), Some("organization"));
        assert_eq!(parsed.rejected[1].category_name(), Some("date"));
    }

    #[test]
    fn test_non_object_is_error() {
        let err = EntityMap::from_value(&json!("{\"person\": []}")).unwrap_err();
        assert!(matches!(err, InputError::InvalidEntityMap(_)));
        assert!(EntityMap::from_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_positioned_category() {
        let value = json!({
            "person": [{"text": "Bob", "start": 4, "end": 7}],
        });
        let parsed = EntityMap::from_value(&value).unwrap();
        let expected = EntityOccurrence {
            category: "person".into(),
            surface_text: "Bob".into(),
            start_offset: 4,
            end_offset: 7,
        };
        assert_eq!(
            parsed.map.get("person"),
            Some(&CategoryEntities::Occurrences(vec![expected]))
        );
    }

    #[test]
    fn test_positioned_category_with_bad_offsets() {
        let value = json!({
            "person": [{"text": "Bob", "start": 7, "end": 4}],
            "date": [{"text": "May", "start": -1, "end": 2}],
        });
        let parsed = EntityMap::from_value(&value).unwrap();
        assert!(parsed.map.is_empty());
        assert_eq!(parsed.rejected.len(), 2);
    }

    #[test]
    fn test_positions_replace_surfaces() {
        let value = json!({
            "entities": {"PERSON": ["Ann"], "ORGANIZATION": ["Acme"]},
            "positions": [
                {"text": "Ann", "type": "PERSON", "start": 0, "end": 3},
                {"text": "Ann", "type": "PERSON", "start": 10, "end": 13},
                {"text": "Paris", "type": "LOCATION", "start": 20, "end": 25},
            ],
        });
        let parsed = EntityMap::from_value(&value).unwrap();

        assert_eq!(
            category_names(&parsed.map),
            vec!["PERSON", "ORGANIZATION", "LOCATION"]
        );
        match parsed.map.get("PERSON") {
            Some(CategoryEntities::Occurrences(o)) => assert_eq!(o.len(), 2),
            other => panic!("expected occurrences, got {:?}", other),
        }
        assert!(matches!(
            parsed.map.get("ORGANIZATION"),
            Some(CategoryEntities::Surfaces(_))
        ));
    }

    #[test]
    fn test_malformed_positions_fall_back_to_surfaces() {
        let value = json!({
            "entities": {"PERSON": ["Ann"]},
            "positions": [{"text": "Ann", "start": 0, "end": 3}],
        });
        let parsed = EntityMap::from_value(&value).unwrap();

        assert!(matches!(
            parsed.map.get("PERSON"),
            Some(CategoryEntities::Surfaces(_))
        ));
        assert!(matches!(parsed.rejected[0], InputError::InvalidPositions(_)));
    }

    #[test]
    fn test_null_positions_ignored() {
        let value = json!({"entities": {"PERSON": ["Ann"]}, "positions": null});
        let parsed = EntityMap::from_value(&value).unwrap();
        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.map.len(), 1);
    }

    #[test]
    fn test_filter_categories() {
        let map = EntityMap::new()
            .with_surfaces("person", ["Alice"])
            .with_surfaces("possible_names", ["Bob"])
            .with_surfaces("location", Vec::<String>::new())
            .with_surfaces("technology", ["Rust"]);
        assert_eq!(map.filter_categories(), vec!["person", "technology"]);
    }

    #[test]
    fn test_summaries() {
        let map = EntityMap::new()
            .with_surfaces("organization", ["Acme", "Globex", "Initech", "Umbrella"])
            .with_surfaces("date", ["Monday"]);
        let summaries = map.summaries(3);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].count, 4);
        assert_eq!(summaries[0].preview, vec!["Acme", "Globex", "Initech"]);
        assert_eq!(summaries[0].remaining, 1);
        assert_eq!(summaries[1].remaining, 0);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = EntityMap::new()
            .with_surfaces("person", ["Alice"])
            .with_surfaces("date", ["Monday"]);
        map.insert("person", CategoryEntities::Surfaces(vec!["Bob".into()]));
        assert_eq!(category_names(&map), vec!["person", "date"]);
        assert_eq!(map.get("person").map(|e| e.surfaces()), Some(vec!["Bob"]));
    }

    #[test]
    fn test_from_json() {
        let parsed = EntityMap::from_json(r#"{"person": ["Alice"]}"#).unwrap();
        assert_eq!(parsed.map.len(), 1);
        assert!(EntityMap::from_json("not json").is_err());
    }
}
