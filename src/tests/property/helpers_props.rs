//! Property-based tests for membership toggles

use proptest::prelude::*;

use crate::core::helpers::{is_member, toggle_membership};

fn arb_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-f0-9]{4}", 0..10).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_toggle_twice_restores_membership(set in arb_ids(), id in "[a-f0-9]{4}") {
        let once = toggle_membership(&id, &set);
        prop_assert_ne!(is_member(&id, &once), is_member(&id, &set));

        let twice = toggle_membership(&id, &once);
        prop_assert_eq!(is_member(&id, &twice), is_member(&id, &set));
        prop_assert_eq!(twice.len(), set.len());
    }

    #[test]
    fn prop_toggle_never_duplicates(set in arb_ids(), id in "[a-f0-9]{4}") {
        let next = toggle_membership(&id, &set);
        prop_assert!(next.iter().filter(|m| **m == id).count() <= 1);
    }
}
