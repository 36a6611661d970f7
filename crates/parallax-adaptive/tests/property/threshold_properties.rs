use parallax_adaptive::ThresholdController;
use proptest::prelude::*;
use test_fixtures as fx;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn threshold_stays_in_bounds_for_any_outcome_sequence(
        outcomes in proptest::collection::vec(any::<bool>(), 0..80)
    ) {
        let store = fx::engine();
        let controller = ThresholdController::new(store);

        for had_changes in outcomes {
            controller.record_outcome("u1", had_changes);
            let threshold = controller.threshold("u1");
            prop_assert!((3..=10).contains(&threshold));
        }
    }

    #[test]
    fn short_sequences_never_move_the_threshold(
        outcomes in proptest::collection::vec(any::<bool>(), 0..10)
    ) {
        let store = fx::engine();
        let controller = ThresholdController::new(store);

        for had_changes in outcomes {
            controller.record_outcome("u1", had_changes);
        }
        prop_assert_eq!(controller.threshold("u1"), 5);
    }
}
