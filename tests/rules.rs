use pigbot::{Action, GameBuilder, GameStatus, PigError, PigState, TurnEvent};

#[test]
fn rolling_accumulates_and_holding_banks() -> Result<(), PigError> {
    let mut game = GameBuilder::new(6, 100)?.with_rolls(vec![4, 6]).build()?;
    assert_eq!(
        game.apply_action(0, Action::Roll)?,
        TurnEvent::Rolled {
            face: 4,
            turn_total: 4
        }
    );
    assert_eq!(
        game.apply_action(0, Action::Roll)?,
        TurnEvent::Rolled {
            face: 6,
            turn_total: 10
        }
    );
    assert_eq!(
        game.apply_action(0, Action::Hold)?,
        TurnEvent::Banked { score: 10 }
    );
    assert_eq!(game.scores(), [10, 0]);
    assert_eq!(game.turn_total(), 0);
    assert_eq!(game.current_player(), 1);
    Ok(())
}

#[test]
fn rolling_a_one_loses_the_turn_total() -> Result<(), PigError> {
    let mut game = GameBuilder::new(6, 100)?.with_rolls(vec![5, 1]).build()?;
    game.apply_action(0, Action::Roll)?;
    assert_eq!(
        game.apply_action(0, Action::Roll)?,
        TurnEvent::Busted { lost: 5 }
    );
    assert_eq!(game.scores(), [0, 0]);
    assert_eq!(game.current_player(), 1);
    Ok(())
}

#[test]
fn reaching_the_target_on_hold_wins() -> Result<(), PigError> {
    let mut game = GameBuilder::new(2, 4)?.with_rolls(vec![2, 2]).build()?;
    game.apply_action(0, Action::Roll)?;
    game.apply_action(0, Action::Roll)?;
    assert_eq!(
        game.apply_action(0, Action::Hold)?,
        TurnEvent::Won {
            winner: 0,
            score: 4
        }
    );
    assert_eq!(game.status(), GameStatus::Finished { winner: 0 });
    assert_eq!(game.winner(), Some(0));
    assert!(game.legal_actions(0)?.is_empty());
    assert!(matches!(
        game.apply_action(0, Action::Roll),
        Err(PigError::GameOver)
    ));
    Ok(())
}

#[test]
fn only_the_current_player_may_act() -> Result<(), PigError> {
    let mut game = GameBuilder::new(6, 100)?.build()?;
    assert!(matches!(
        game.apply_action(1, Action::Roll),
        Err(PigError::NotPlayersTurn)
    ));
    assert!(matches!(
        game.apply_action(2, Action::Hold),
        Err(PigError::InvalidPlayer(2))
    ));
    assert!(matches!(game.state_view(3), Err(PigError::InvalidPlayer(3))));
    assert_eq!(game.legal_actions(0)?, vec![Action::Roll, Action::Hold]);
    Ok(())
}

#[test]
fn scripted_rolls_are_validated_and_can_run_out() -> Result<(), PigError> {
    assert!(GameBuilder::new(6, 100)?.with_rolls(vec![7]).build().is_err());
    assert!(GameBuilder::new(6, 100)?.with_rolls(vec![0]).build().is_err());
    let mut game = GameBuilder::new(6, 100)?.with_rolls(vec![3]).build()?;
    game.apply_action(0, Action::Roll)?;
    assert!(matches!(
        game.apply_action(0, Action::Roll),
        Err(PigError::DiceExhausted)
    ));
    Ok(())
}

#[test]
fn views_map_onto_solver_states() -> Result<(), PigError> {
    let mut game = GameBuilder::new(6, 100)?.with_rolls(vec![6, 3, 5]).build()?;
    game.apply_action(0, Action::Roll)?;
    game.apply_action(0, Action::Hold)?;
    game.apply_action(1, Action::Roll)?;
    game.apply_action(1, Action::Roll)?;
    let mover = game.state_view(1)?;
    assert_eq!(mover.last_roll, Some(5));
    assert_eq!(mover.pig_state(), PigState::new(0, 6, 8));
    let waiting = game.state_view(0)?;
    assert_eq!(waiting.pig_state(), PigState::new(6, 0, 0));
    Ok(())
}

#[test]
fn seeded_games_are_reproducible() -> Result<(), PigError> {
    let play = |seed: u64| -> Result<Vec<TurnEvent>, PigError> {
        let mut game = GameBuilder::new(6, 100)?.with_seed(seed).build()?;
        let mut events = Vec::new();
        for _ in 0..20 {
            let current = game.current_player();
            events.push(game.apply_action(current, Action::Roll)?);
        }
        Ok(events)
    };
    assert_eq!(play(42)?, play(42)?);
    Ok(())
}
