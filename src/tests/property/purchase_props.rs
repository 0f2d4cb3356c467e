//! Property-based tests for ticket purchases
//!
//! Tests invariants:
//! - Parsed quantity is always within the allowed range
//! - Stepping never leaves the range
//! - Total price is quantity times unit price

use proptest::prelude::*;

use crate::core::purchase::{parse_quantity, PurchaseOrder, MAX_TICKETS, MIN_TICKETS};

proptest! {
    #[test]
    fn prop_parsed_quantity_in_range(raw in ".*") {
        let q = parse_quantity(&raw);
        prop_assert!((MIN_TICKETS..=MAX_TICKETS).contains(&q));
    }

    #[test]
    fn prop_in_range_numbers_parse_exactly(n in MIN_TICKETS..=MAX_TICKETS) {
        prop_assert_eq!(parse_quantity(&n.to_string()), n);
    }

    #[test]
    fn prop_large_numbers_clamp_to_max(n in (MAX_TICKETS as u64 + 1)..u64::MAX) {
        prop_assert_eq!(parse_quantity(&n.to_string()), MAX_TICKETS);
    }

    #[test]
    fn prop_steps_stay_in_range(steps in prop::collection::vec(any::<bool>(), 0..50)) {
        let mut order = PurchaseOrder::new(2.5);
        for up in steps {
            if up {
                order.increment();
            } else {
                order.decrement();
            }
            prop_assert!((MIN_TICKETS..=MAX_TICKETS).contains(&order.quantity()));
        }
    }

    #[test]
    fn prop_total_is_derived(raw in "[0-9]{1,3}", price in 1.0f64..500.0) {
        let mut order = PurchaseOrder::new(price);
        order.set_quantity(&raw);
        prop_assert_eq!(order.total_price(), order.quantity() as f64 * price);
    }
}
