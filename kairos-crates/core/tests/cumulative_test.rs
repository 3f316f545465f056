#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::assert_decisions_keep_solutions;
use helpers::assert_supports_kept;
use helpers::init_logging;
use helpers::respects_max;
use helpers::respects_min;
use helpers::supports;
use helpers::ActivityBounds;
use kairos_core::basic_types::PropagationOutcome;
use kairos_core::constraints;
use kairos_core::constraints::Constraint;
use kairos_core::engine::propagation::ReadDomains;
use kairos_core::engine::State;
use kairos_core::propagators::cumulative::satisfies_cumulative_max;
use kairos_core::propagators::cumulative::satisfies_cumulative_min;
use kairos_core::propagators::cumulative::Activity;
use kairos_core::propagators::cumulative::CumulativeOptions;
use kairos_core::propagators::cumulative::Rectangle;
use kairos_core::ConstraintOperationError;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

const HORIZON: i32 = 6;

fn random_instance(rng: &mut SmallRng, max_activities: usize) -> Vec<ActivityBounds> {
    let number_of_activities = rng.gen_range(1..=max_activities);
    (0..number_of_activities)
        .map(|_| ActivityBounds::random(rng, HORIZON, 3))
        .collect()
}

/// An instance in which some activities may produce the resource instead of consuming it.
fn producer_instance(rng: &mut SmallRng, max_activities: usize) -> Vec<ActivityBounds> {
    let number_of_activities = rng.gen_range(1..=max_activities);
    (0..number_of_activities)
        .map(|_| ActivityBounds::random_with_heights(rng, HORIZON, -2, 3))
        .collect()
}

/// Posts the maximum capacity sweep on `instance` and checks that no value which occurs in a
/// solution is removed.
fn check_maximum_capacity(instance: &[ActivityBounds], capacity: i32) {
    let mut state = State::default();
    let activities = instance
        .iter()
        .map(|bounds| bounds.create(&mut state))
        .collect::<Vec<_>>();
    let result =
        constraints::cumulative_max(activities.clone(), capacity, CumulativeOptions::default())
            .post(&mut state);

    let supports = supports(instance, |placements| {
        respects_max(placements, capacity, HORIZON)
    });
    match (result, supports) {
        (Ok(()), Some(supports)) => assert_supports_kept(&state, &activities, &supports, instance),
        (Err(ConstraintOperationError::InfeasibleState), None) | (Ok(()), None) => {}
        (Err(error), Some(_)) => {
            panic!("{error} although {instance:?} has a solution with capacity {capacity}")
        }
        (Err(error), None) => panic!("unexpected error {error}"),
    }
}

/// Posts the minimum capacity sweep on `instance` and checks that no value which occurs in a
/// solution is removed.
fn check_minimum_capacity(instance: &[ActivityBounds], min_capacity: i32) {
    let mut state = State::default();
    let activities = instance
        .iter()
        .map(|bounds| bounds.create(&mut state))
        .collect::<Vec<_>>();
    let result = constraints::cumulative_min(activities.clone(), min_capacity).post(&mut state);

    let supports = supports(instance, |placements| {
        respects_min(placements, min_capacity, HORIZON)
    });
    match (result, supports) {
        (Ok(()), Some(supports)) => assert_supports_kept(&state, &activities, &supports, instance),
        (Err(ConstraintOperationError::InfeasibleState), None) | (Ok(()), None) => {}
        (Err(error), Some(_)) => panic!(
            "{error} although {instance:?} has a solution with minimum capacity {min_capacity}"
        ),
        (Err(error), None) => panic!("unexpected error {error}"),
    }
}

#[test]
fn sweep_with_maximum_capacity_keeps_every_solution() {
    init_logging();
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..150 {
        let instance = random_instance(&mut rng, 3);
        let capacity = rng.gen_range(1..=4);
        check_maximum_capacity(&instance, capacity);
    }
}

#[test]
fn sweep_with_minimum_capacity_keeps_every_solution() {
    init_logging();
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..150 {
        let instance = random_instance(&mut rng, 3);
        let min_capacity = rng.gen_range(1..=3);
        check_minimum_capacity(&instance, min_capacity);
    }
}

#[test]
fn sweep_with_maximum_capacity_keeps_every_solution_with_producers() {
    let mut rng = SmallRng::seed_from_u64(13);

    for _ in 0..150 {
        let instance = producer_instance(&mut rng, 3);
        let capacity = rng.gen_range(0..=3);
        check_maximum_capacity(&instance, capacity);
    }
}

#[test]
fn sweep_with_minimum_capacity_keeps_every_solution_with_producers() {
    let mut rng = SmallRng::seed_from_u64(19);

    for _ in 0..150 {
        let instance = producer_instance(&mut rng, 3);
        let min_capacity = rng.gen_range(0..=3);
        check_minimum_capacity(&instance, min_capacity);
    }
}

#[test]
fn sweep_with_maximum_capacity_keeps_every_solution_under_search() {
    init_logging();
    let mut rng = SmallRng::seed_from_u64(37);

    for _ in 0..40 {
        let instance = producer_instance(&mut rng, 3);
        let capacity = rng.gen_range(1..=4);

        let mut state = State::default();
        let activities = instance
            .iter()
            .map(|bounds| bounds.create(&mut state))
            .collect::<Vec<_>>();
        let result =
            constraints::cumulative_max(activities.clone(), capacity, CumulativeOptions::default())
                .post(&mut state);
        if result.is_err() {
            continue;
        }

        assert_decisions_keep_solutions(
            &mut rng,
            &mut state,
            &activities,
            &instance,
            |placements| respects_max(placements, capacity, HORIZON),
        );
    }
}

#[test]
fn sweep_with_minimum_capacity_keeps_every_solution_under_search() {
    let mut rng = SmallRng::seed_from_u64(39);

    for _ in 0..40 {
        let instance = producer_instance(&mut rng, 3);
        let min_capacity = rng.gen_range(1..=3);

        let mut state = State::default();
        let activities = instance
            .iter()
            .map(|bounds| bounds.create(&mut state))
            .collect::<Vec<_>>();
        if constraints::cumulative_min(activities.clone(), min_capacity)
            .post(&mut state)
            .is_err()
        {
            continue;
        }

        assert_decisions_keep_solutions(
            &mut rng,
            &mut state,
            &activities,
            &instance,
            |placements| respects_min(placements, min_capacity, HORIZON),
        );
    }
}

#[test]
fn sweep_detects_every_overload_of_the_decomposition() {
    let mut rng = SmallRng::seed_from_u64(3);

    for _ in 0..200 {
        let instance = random_instance(&mut rng, 4);
        let capacity = rng.gen_range(1..=4);

        let mut decomposition_state = State::default();
        let activities = instance
            .iter()
            .map(|bounds| bounds.create(&mut decomposition_state))
            .collect::<Vec<_>>();
        let decomposition =
            constraints::cumulative_decomposition(activities, capacity).post(&mut decomposition_state);

        let mut sweep_state = State::default();
        let activities = instance
            .iter()
            .map(|bounds| bounds.create(&mut sweep_state))
            .collect::<Vec<_>>();
        let sweep = constraints::cumulative_max(activities, capacity, CumulativeOptions::default())
            .post(&mut sweep_state);

        if decomposition.is_err() {
            assert_eq!(
                Err(ConstraintOperationError::InfeasibleState),
                sweep,
                "only the decomposition detected the overload of {instance:?} with capacity {capacity}"
            );
        }
    }
}

/// Creates `number_of_activities` present activities with fixed random positions and heights.
fn fixed_instance(rng: &mut SmallRng, number_of_activities: usize) -> Vec<ActivityBounds> {
    (0..number_of_activities)
        .map(|_| {
            let length = rng.gen_range(0..=3);
            let start = rng.gen_range(0..=HORIZON - length);
            let height = rng.gen_range(0..=3);
            ActivityBounds {
                start_min: start,
                end_max: start + length,
                length_min: length,
                length_max: length,
                height_min: height,
                height_max: height,
                optional: false,
            }
        })
        .collect()
}

fn rectangles(instance: &[ActivityBounds]) -> Vec<Rectangle> {
    instance
        .iter()
        .map(|bounds| Rectangle::new(bounds.start_min, bounds.end_max, bounds.height_min))
        .collect()
}

#[test]
fn accepted_fixed_activities_respect_the_capacity() {
    let mut rng = SmallRng::seed_from_u64(11);

    for _ in 0..200 {
        let number_of_activities = rng.gen_range(1..=5);
        let instance = fixed_instance(&mut rng, number_of_activities);
        let capacity = rng.gen_range(0..=5);
        let min_capacity = rng.gen_range(0..=3);

        let mut state = State::default();
        let activities = instance
            .iter()
            .map(|bounds| bounds.create(&mut state))
            .collect::<Vec<_>>();
        let result = constraints::cumulative_max(activities, capacity, CumulativeOptions::default())
            .post(&mut state);
        assert_eq!(
            result.is_ok(),
            satisfies_cumulative_max(&rectangles(&instance), capacity),
            "{instance:?} with capacity {capacity}"
        );

        let mut state = State::default();
        let activities = instance
            .iter()
            .map(|bounds| bounds.create(&mut state))
            .collect::<Vec<_>>();
        let result = constraints::cumulative_min(activities, min_capacity).post(&mut state);
        assert_eq!(
            result.is_ok(),
            satisfies_cumulative_min(&rectangles(&instance), min_capacity),
            "{instance:?} with minimum capacity {min_capacity}"
        );
    }
}

#[test]
fn three_activities_which_pairwise_overlap_are_infeasible() {
    let mut state = State::default();
    let activities = (0..3)
        .map(|_| Activity::new(state.new_interval_variable(0, 5, 4, 4), 2))
        .collect::<Vec<_>>();

    let result =
        constraints::cumulative_max(activities, 3, CumulativeOptions::default()).post(&mut state);
    assert_eq!(Err(ConstraintOperationError::InfeasibleState), result);
}

#[test]
fn second_propagation_changes_nothing() {
    let mut rng = SmallRng::seed_from_u64(5);

    for _ in 0..50 {
        let instance = random_instance(&mut rng, 4);
        let capacity = rng.gen_range(1..=4);

        let mut state = State::default();
        let activities = instance
            .iter()
            .map(|bounds| bounds.create(&mut state))
            .collect::<Vec<_>>();
        if constraints::cumulative_max(activities, capacity, CumulativeOptions::default())
            .post(&mut state)
            .is_err()
        {
            continue;
        }

        assert_eq!(Ok(PropagationOutcome::NoChange), state.propagate_once());
    }
}

#[test]
fn decisions_are_undone_on_backtracking() {
    let mut state = State::default();
    let fixed = state.new_interval_variable(0, 4, 4, 4);
    let movable = state.new_interval_variable(0, 12, 3, 3);
    let other = state.new_interval_variable(0, 12, 3, 3);
    let result = constraints::cumulative_max(
        [
            Activity::new(fixed, 2),
            Activity::new(movable, 2),
            Activity::new(other, 2),
        ],
        3,
        CumulativeOptions::default(),
    )
    .post(&mut state);
    assert!(result.is_ok());
    assert_eq!(4, state.start_min(&movable));

    state.new_checkpoint();
    let result = state.modify(|context| context.set_start_max(&movable, 5));
    assert!(result.is_ok());
    let result = state.fixpoint();
    assert!(result.is_ok());
    // movable occupies [5, 7) for sure, so other starts at 7 at the earliest
    assert_eq!(7, state.start_min(&other));

    state.restore_to(0);
    assert_eq!(4, state.start_min(&other));
    assert_eq!(9, state.start_max(&movable));
}
