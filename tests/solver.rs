use pigbot::{
    Action, PigError, PigState, Solution, SolverConfig, SweepOrder, action_values, solve,
    state_count,
};

const EPSILON: f64 = 1e-9;

fn solved(die: u32, target: u32) -> Solution {
    solve(&SolverConfig::new(die, target).unwrap().with_epsilon(EPSILON)).unwrap()
}

#[test]
fn boundaries_are_exact() {
    let solution = solved(6, 25);
    for i in 0..40 {
        for j in 0..40 {
            for k in 0..40 {
                let p = solution.win_probability(PigState::new(i, j, k));
                if i + k >= 25 {
                    assert_eq!(p, 1.0, "({i},{j},{k})");
                } else if j >= 25 {
                    assert_eq!(p, 0.0, "({i},{j},{k})");
                } else {
                    assert!(p > 0.0 && p < 1.0, "({i},{j},{k}) = {p}");
                }
            }
        }
    }
}

#[test]
fn converged_values_satisfy_the_recurrence() {
    for (die, target) in [(6, 30), (3, 17), (10, 12)] {
        let solution = solved(die, target);
        let values = solution.values();
        for (i, j, k) in values.coordinates() {
            let residual = (values.get(i, j, k) - action_values(values, die, i, j, k).best()).abs();
            assert!(
                residual <= EPSILON,
                "die {die} target {target}: residual {residual} at ({i},{j},{k})"
            );
        }
    }
}

#[test]
fn turn_total_never_hurts() {
    let solution = solved(6, 30);
    for i in 0..30 {
        for j in 0..30 {
            for k in 0..(30 - i) {
                let here = solution.win_probability(PigState::new(i, j, k));
                let next = solution.win_probability(PigState::new(i, j, k + 1));
                assert!(next + 1e-7 >= here, "({i},{j},{k}): {here} > {next}");
            }
        }
    }
}

#[test]
fn recommended_action_follows_the_stored_policy() {
    let solution = solved(4, 20);
    for (i, j, k) in solution.values().coordinates() {
        let state = PigState::new(i, j, k);
        let expected = if solution.policy().get(i, j, k) {
            Action::Roll
        } else {
            Action::Hold
        };
        assert_eq!(solution.recommended_action(state), expected);
    }
    assert_eq!(
        solution.recommended_action(PigState::new(19, 5, 1)),
        Action::Hold
    );
    assert_eq!(
        solution.recommended_action(PigState::new(0, 20, 0)),
        Action::Hold
    );
}

#[test]
fn layered_and_global_orders_agree() {
    let config = SolverConfig::new(5, 20).unwrap().with_epsilon(EPSILON);
    let layered = solve(&config).unwrap();
    let global = solve(&config.with_order(SweepOrder::Global)).unwrap();
    for (i, j, k) in layered.values().coordinates() {
        let a = layered.values().get(i, j, k);
        let b = global.values().get(i, j, k);
        assert!((a - b).abs() < 1e-6, "({i},{j},{k}): {a} vs {b}");
    }
}

#[test]
fn two_sided_die_to_two_is_a_race_to_the_first_two() {
    // Every roll either busts or reaches the target, so the player to move
    // wins with p = 1/2 + (1/2)(1 - p), i.e. p = 2/3, from every state.
    let solution = solved(2, 2);
    assert_eq!(Some(solution.values().len()), state_count(2));
    assert_eq!(solution.values().len(), 6);
    for (i, j, k) in solution.values().coordinates() {
        let state = PigState::new(i, j, k);
        assert!((solution.win_probability(state) - 2.0 / 3.0).abs() < 1e-8);
        assert_eq!(solution.recommended_action(state), Action::Roll);
    }
    assert_eq!(solution.win_probability(PigState::new(1, 0, 1)), 1.0);
    assert_eq!(solution.win_probability(PigState::new(0, 2, 0)), 0.0);
}

#[test]
fn classic_pig_first_player_advantage() {
    let solution = solve(&SolverConfig::new(6, 100).unwrap()).unwrap();
    let p = solution.win_probability(PigState::initial());
    assert!(p > 0.5 && p < 0.55, "p = {p}");
    assert!((p - 0.5306).abs() < 1e-3, "p = {p}");
}

#[test]
fn invalid_configurations_are_rejected() {
    assert!(matches!(
        SolverConfig::new(1, 100),
        Err(PigError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        SolverConfig::new(6, 0),
        Err(PigError::InvalidConfiguration(_))
    ));
}
