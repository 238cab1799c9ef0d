mod common;

use std::time::{Duration, Instant};

use common::hand_landmarks;
use handtrigger::gesture::{classify, GestureLabel, TARGET_PATTERN};
use handtrigger::hand::{extract, FingerStates, HandPose, Landmark, LANDMARK_COUNT};
use handtrigger::trigger::{ReleasePolicy, TriggerStateMachine};
use proptest::prelude::*;

fn arb_label() -> impl Strategy<Value = GestureLabel> {
    prop_oneof![
        Just(GestureLabel::None),
        Just(GestureLabel::Target),
        Just(GestureLabel::Other),
    ]
}

fn arb_landmarks() -> impl Strategy<Value = Vec<Landmark>> {
    prop::collection::vec(
        (0.0f32..1.0, 0.0f32..1.0, -0.5f32..0.5).prop_map(|(x, y, z)| Landmark::new(x, y, z)),
        LANDMARK_COUNT,
    )
}

proptest! {
    #[test]
    fn classify_is_target_iff_pattern_matches(states in prop::array::uniform5(any::<bool>())) {
        let states = FingerStates::new(states);
        let label = classify(Some(&states));
        prop_assert_eq!(label == GestureLabel::Target, states == TARGET_PATTERN);
        prop_assert_ne!(label, GestureLabel::None);
    }

    #[test]
    fn extract_is_deterministic(points in arb_landmarks()) {
        let first = HandPose::try_from(points.clone()).unwrap();
        let second = HandPose::try_from(points).unwrap();
        prop_assert_eq!(extract(&first), extract(&second));
    }

    #[test]
    fn extract_recovers_synthetic_pattern(pattern in prop::array::uniform5(any::<bool>())) {
        let pose = HandPose::try_from(hand_landmarks(pattern)).unwrap();
        prop_assert_eq!(extract(&pose), FingerStates::new(pattern));
    }

    #[test]
    fn idle_only_arms_on_target(label in arb_label()) {
        let mut machine = TriggerStateMachine::default();
        prop_assert!(machine.on_frame(label, Instant::now()).is_none());
        prop_assert_eq!(machine.state().is_armed(), label == GestureLabel::Target);
        prop_assert_eq!(machine.state().is_idle(), label != GestureLabel::Target);
    }

    #[test]
    fn at_most_one_command_per_episode(
        labels in prop::collection::vec(arb_label(), 1..200),
        policy in prop_oneof![Just(ReleasePolicy::Commit), Just(ReleasePolicy::Cancel)],
    ) {
        let t0 = Instant::now();
        let mut machine = TriggerStateMachine::new(Duration::from_millis(3000), policy);
        let mut armed_since_commit = false;

        for (i, label) in labels.into_iter().enumerate() {
            let now = t0 + Duration::from_millis(i as u64 * 250);
            let was_armed = machine.state().is_armed();
            let command = machine.on_frame(label, now);

            if command.is_some() {
                // a commit only ever ends an armed episode
                prop_assert!(was_armed);
                prop_assert!(!armed_since_commit);
                prop_assert!(machine.state().is_cooldown());
                armed_since_commit = true;
            }
            if machine.state().is_armed() && !was_armed {
                armed_since_commit = false;
            }
        }
    }

    #[test]
    fn commit_lands_on_first_frame_past_delay(step_ms in 1u64..500) {
        let t0 = Instant::now();
        let mut machine = TriggerStateMachine::default();
        machine.on_frame(GestureLabel::Target, t0);

        let mut elapsed = 0;
        loop {
            elapsed += step_ms;
            let command = machine.on_frame(GestureLabel::Target, t0 + Duration::from_millis(elapsed));
            if elapsed < 3000 {
                prop_assert!(command.is_none());
            } else {
                prop_assert!(command.is_some());
                break;
            }
        }
    }

    #[test]
    fn cooldown_holds_across_target_frames(extra in 1usize..100) {
        let t0 = Instant::now();
        let mut machine = TriggerStateMachine::default();
        machine.on_frame(GestureLabel::Target, t0);
        prop_assert!(machine.on_frame(GestureLabel::Target, t0 + Duration::from_millis(3000)).is_some());

        for i in 0..extra {
            let now = t0 + Duration::from_millis(3000 + i as u64 * 33);
            prop_assert!(machine.on_frame(GestureLabel::Target, now).is_none());
            prop_assert!(machine.state().is_cooldown());
        }
        machine.on_frame(GestureLabel::None, t0 + Duration::from_millis(10_000));
        prop_assert!(machine.state().is_idle());
    }
}
