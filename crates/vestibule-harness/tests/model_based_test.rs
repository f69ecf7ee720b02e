//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! controller (driven by `FormWorld`) behaves identically to the reference
//! model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelForm      FormWorld       Compare
//!      (ms-by-ms)     (real ctrl)     Results
//! ```

use proptest::prelude::*;
use vestibule_harness::{FormWorld, ModelForm, Operation, SimConfig};

/// Identities biased towards the interesting boundary cases.
fn identity_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just("carol@wustl.edu".to_string()),
        1 => Just("ALICE@WUSTL.EDU".to_string()),
        2 => Just("bobuser".to_string()),
        1 => Just("bo".to_string()),
        1 => Just("@wustl.edu".to_string()),
        1 => Just("a b@wustl.edu".to_string()),
        1 => Just("eve@gmail.com".to_string()),
        1 => Just(String::new()),
        2 => "[a-z@. ]{0,14}",
    ]
}

/// Codes straddling the six-character threshold.
fn code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just("123456".to_string()),
        2 => Just("12345".to_string()),
        1 => Just("abcdef".to_string()),
        1 => Just(String::new()),
        2 => "[0-9 ]{0,8}",
    ]
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => identity_strategy().prop_map(|value| Operation::SetIdentity { value }),
        3 => code_strategy().prop_map(|value| Operation::SetCode { value }),
        2 => Just(Operation::PressSend),
        2 => Just(Operation::PressSubmit),
        3 => (0u16..3000).prop_map(|millis| Operation::AdvanceTime { millis }),
        // Long jumps that cross the whole countdown.
        1 => Just(Operation::AdvanceTime { millis: 61_000 }),
    ]
}

proptest! {
    /// The core model-based test: results and observable states must match
    /// after every operation.
    #[test]
    fn prop_model_matches_world(ops in prop::collection::vec(operation_strategy(), 0..40)) {
        let config = SimConfig::default();
        let mut model = ModelForm::new(config.clone());
        let mut world = FormWorld::new(config);

        for (i, op) in ops.iter().enumerate() {
            let model_result = model.apply(op);
            let world_result = world.apply(op);
            prop_assert_eq!(
                model_result,
                world_result,
                "result divergence at operation {}: {:?}",
                i,
                op
            );

            prop_assert_eq!(
                model.observable_state(),
                world.observable_state(),
                "state divergence after operation {}: {:?}",
                i,
                op
            );
        }
    }

    /// Structural invariants of the real controller hold under any
    /// operation sequence.
    #[test]
    fn prop_world_invariants(ops in prop::collection::vec(operation_strategy(), 0..60)) {
        let mut world = FormWorld::new(SimConfig::default());
        let mut seen_navigation: Option<String> = None;

        for op in &ops {
            let _ = world.apply(op);
            let state = world.observable_state();

            // A send in flight and a running countdown never overlap.
            if state.send_label == "Sending…" {
                prop_assert!(state.countdown_line.is_none());
            }

            // An enabled button never carries an in-flight label.
            if state.send_enabled {
                prop_assert!(state.send_label != "Sending…");
                prop_assert!(state.countdown_line.is_none());
            }
            if state.submit_enabled {
                prop_assert_eq!(state.submit_label.as_str(), "Sign In");
            }

            // Navigation is sticky: once set it never changes or clears.
            if let Some(nav) = &seen_navigation {
                prop_assert_eq!(state.navigated_to.as_ref(), Some(nav));
            } else {
                seen_navigation = state.navigated_to.clone();
            }
        }
    }

    /// Replaying the same operations produces identical results.
    #[test]
    fn prop_runs_are_deterministic(ops in prop::collection::vec(operation_strategy(), 0..40)) {
        let mut first = FormWorld::new(SimConfig::default());
        let mut second = FormWorld::new(SimConfig::default());

        for op in &ops {
            let first_result = first.apply(op);
            let second_result = second.apply(op);
            prop_assert_eq!(first_result, second_result);
        }
        prop_assert_eq!(first.observable_state(), second.observable_state());
    }
}
