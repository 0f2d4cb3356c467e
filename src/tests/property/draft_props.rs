//! Property-based tests for draft editing
//!
//! Tests invariants:
//! - Prize ranks mirror list positions after any edit sequence
//! - The prize list never drops below one entry
//! - Ticket price is at least 1 after any edit

use proptest::prelude::*;

use crate::core::campaign::draft::parse_ticket_price;
use crate::core::campaign::{CampaignDraft, PrizeField};

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum PrizeOp {
    Append,
    RemoveLast,
    Update(usize, bool, String),
}

fn arb_prize_op() -> impl Strategy<Value = PrizeOp> {
    prop_oneof![
        Just(PrizeOp::Append),
        Just(PrizeOp::RemoveLast),
        (0usize..12, any::<bool>(), "[a-zA-Z ]{0,20}")
            .prop_map(|(index, icon, value)| PrizeOp::Update(index, icon, value)),
    ]
}

fn apply(draft: &mut CampaignDraft, op: &PrizeOp) {
    match op {
        PrizeOp::Append => draft.append_prize(),
        PrizeOp::RemoveLast => draft.remove_last_prize(),
        PrizeOp::Update(index, icon, value) => {
            let field = if *icon {
                PrizeField::Icon
            } else {
                PrizeField::Description
            };
            draft.update_prize(*index, field, value.clone());
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_ranks_follow_positions(ops in prop::collection::vec(arb_prize_op(), 0..40)) {
        let mut draft = CampaignDraft::new("ada@example.com");
        for op in &ops {
            apply(&mut draft, op);
        }

        prop_assert!(!draft.prizes().is_empty());
        for (i, prize) in draft.prizes().iter().enumerate() {
            prop_assert_eq!(prize.rank, i as u32 + 1);
        }
    }

    #[test]
    fn prop_ticket_price_at_least_one(raw in ".*") {
        let price = parse_ticket_price(&raw);
        prop_assert!(price >= 1.0);
        prop_assert!(price.is_finite());
    }

    #[test]
    fn prop_ticket_price_keeps_valid_prices(value in 1.0f64..10_000.0) {
        let raw = value.to_string();
        prop_assert_eq!(parse_ticket_price(&raw), value);
    }
}
