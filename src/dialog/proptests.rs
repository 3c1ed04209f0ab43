//! Property-based tests for the dialog transition
//!
//! These verify the invariants hold across arbitrary cursors, memory
//! contents, and extraction outcomes — including cursors that could
//! only come from corrupted memory.

use super::state::*;
use super::transition::*;
use crate::config::RecallPolicy;
use crate::nlp::City;
use proptest::prelude::*;

fn arb_city() -> impl Strategy<Value = City> {
    "[A-Z][a-z]{2,10}".prop_map(City::named)
}

fn arb_cursor() -> impl Strategy<Value = DialogCursor> {
    (0usize..4, any::<bool>()).prop_map(|(index, entered)| DialogCursor { index, entered })
}

fn arb_extraction() -> impl Strategy<Value = Extraction> {
    prop_oneof![
        Just(Extraction::None),
        Just(Extraction::Failed),
        arb_city().prop_map(Extraction::City),
    ]
}

fn arb_policy() -> impl Strategy<Value = RecallPolicy> {
    prop_oneof![Just(RecallPolicy::Confirm), Just(RecallPolicy::Overwrite)]
}

proptest! {
    /// The next cursor always points at a real state.
    #[test]
    fn prop_next_cursor_in_bounds(
        cursor in arb_cursor(),
        remembered in proptest::option::of(arb_city()),
        extraction in arb_extraction(),
        policy in arb_policy(),
    ) {
        let result = step(cursor, remembered, &extraction, policy);
        prop_assert!(result.next.index <= 1);
    }

    /// Memory is only ever written with the freshly extracted city.
    #[test]
    fn prop_store_effect_matches_extraction(
        cursor in arb_cursor(),
        remembered in proptest::option::of(arb_city()),
        extraction in arb_extraction(),
        policy in arb_policy(),
    ) {
        let result = step(cursor, remembered, &extraction, policy);
        for effect in &result.effects {
            if let MemoryEffect::StoreCity(stored) = effect {
                prop_assert_eq!(Some(stored), match &extraction {
                    Extraction::City(city) => Some(city),
                    _ => None,
                });
            }
        }
    }

    /// An entry-prompt turn consumes nothing and mutates nothing.
    #[test]
    fn prop_entry_turn_has_no_effects(
        remembered in proptest::option::of(arb_city()),
        extraction in arb_extraction(),
        policy in arb_policy(),
    ) {
        let cursor = DialogCursor::default();
        if awaits_entry(cursor, remembered.is_some(), policy) {
            let result = step(cursor, remembered, &extraction, policy);
            prop_assert!(result.effects.is_empty());
            prop_assert!(matches!(result.reply, StepReply::Prompt(_)));
            prop_assert_eq!(result.next, DialogCursor { index: 0, entered: true });
        }
    }

    /// A weather reply always parks the cursor in the terminal state;
    /// the reset only ever happens from the terminal state.
    #[test]
    fn prop_weather_reply_parks_in_terminal_state(
        cursor in arb_cursor(),
        remembered in proptest::option::of(arb_city()),
        extraction in arb_extraction(),
        policy in arb_policy(),
    ) {
        let result = step(cursor, remembered, &extraction, policy);
        if matches!(result.reply, StepReply::Weather(_)) {
            prop_assert_eq!(result.next, DialogCursor { index: 1, entered: true });
        }
        if result.effects.contains(&MemoryEffect::ClearCity) {
            prop_assert!(cursor.index != 0);
            prop_assert_eq!(result.next, DialogCursor::default());
        }
    }

    /// The transition is deterministic.
    #[test]
    fn prop_step_is_pure(
        cursor in arb_cursor(),
        remembered in proptest::option::of(arb_city()),
        extraction in arb_extraction(),
        policy in arb_policy(),
    ) {
        let first = step(cursor, remembered.clone(), &extraction, policy);
        let second = step(cursor, remembered, &extraction, policy);
        prop_assert_eq!(first, second);
    }
}
