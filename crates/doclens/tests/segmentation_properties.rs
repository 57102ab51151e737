//! Property tests for segmentation and statistics invariants.

use doclens::services::canonical_category;
use doclens::{compute_statistics, segment, EntityMap, Segmentation};
use proptest::prelude::*;

const CATEGORIES: &[&str] = &["person", "organization", "possible_names", "gadget"];

fn entity_map_strategy() -> impl Strategy<Value = EntityMap> {
    prop::collection::vec(
        (
            prop::sample::select(CATEGORIES),
            prop::collection::vec("[abé]{1,3}", 0..4),
        ),
        0..4,
    )
    .prop_map(|categories| {
        categories
            .into_iter()
            .fold(EntityMap::new(), |map, (category, surfaces)| {
                map.with_surfaces(category, surfaces)
            })
    })
}

fn assert_no_overlap(segmentation: &Segmentation) {
    let ranges = segmentation.tagged_ranges();
    for pair in ranges.windows(2) {
        assert!(
            pair[0].0.end <= pair[1].0.start,
            "overlapping tagged ranges: {:?}",
            ranges
        );
    }
}

proptest! {
    #[test]
    fn concatenation_preserves_text(
        text in "[abé .\n]{0,40}",
        map in entity_map_strategy(),
    ) {
        prop_assert_eq!(segment(&text, &map, None).text(), text.clone());
        for &active in CATEGORIES {
            prop_assert_eq!(segment(&text, &map, Some(active)).text(), text.clone());
        }
    }

    #[test]
    fn tagged_segments_never_overlap(
        text in "[abé .]{0,40}",
        map in entity_map_strategy(),
    ) {
        assert_no_overlap(&segment(&text, &map, None));
        for &active in CATEGORIES {
            assert_no_overlap(&segment(&text, &map, Some(active)));
        }
    }

    #[test]
    fn segmentation_is_idempotent(
        text in "[abé .]{0,40}",
        map in entity_map_strategy(),
    ) {
        prop_assert_eq!(segment(&text, &map, None), segment(&text, &map, None));
    }

    #[test]
    fn filter_only_tags_active_category(
        text in "[abé .]{0,40}",
        map in entity_map_strategy(),
        active in prop::sample::select(CATEGORIES),
    ) {
        let filtered = segment(&text, &map, Some(active));
        for category in filtered.categories() {
            prop_assert_eq!(category, canonical_category(active));
        }
    }

    #[test]
    fn tagged_text_is_a_known_surface(
        text in "[abé .]{0,40}",
        map in entity_map_strategy(),
    ) {
        let result = segment(&text, &map, None);
        for tagged in result.tagged() {
            let category = tagged.category().unwrap_or_default();
            let known = map.iter().any(|(c, entities)| {
                canonical_category(c) == category && entities.surfaces().contains(&tagged.text())
            });
            prop_assert!(known, "unexpected tagged segment {:?}", tagged);
        }
    }

    #[test]
    fn top_words_are_ranked_and_limited(
        text in "[a-e ,.]{0,80}",
        limit in 0usize..6,
    ) {
        let stats = compute_statistics(&text, limit);
        prop_assert!(stats.top_words.len() <= limit);
        prop_assert!(stats.top_words.windows(2).all(|w| w[0].count >= w[1].count));
        prop_assert_eq!(stats.word_count, text.split_whitespace().count());
        prop_assert_eq!(stats.character_count, text.chars().count());
    }
}
