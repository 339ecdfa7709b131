use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{Action, PlayerId};
use crate::dice::roll_die;
use crate::error::PigError;
use crate::state::{GameSettings, GameStateView, GameStatus, NUM_PLAYERS};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub settings: GameSettings,
    pub seed: u64,
}

impl GameConfig {
    pub fn new(die: u32, target: u32, seed: u64) -> Result<Self, PigError> {
        Ok(Self {
            settings: GameSettings::new(die, target)?,
            seed,
        })
    }
}

/// Builder that enables scripted dice for deterministic tests.
pub struct GameBuilder {
    config: GameConfig,
    rolls: Option<Vec<u32>>,
}

impl GameBuilder {
    pub fn new(die: u32, target: u32) -> Result<Self, PigError> {
        Ok(Self {
            config: GameConfig::new(die, target, DEFAULT_SEED)?,
            rolls: None,
        })
    }

    pub fn from_settings(settings: GameSettings) -> Self {
        Self {
            config: GameConfig {
                settings,
                seed: DEFAULT_SEED,
            },
            rolls: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Replace the random die with a fixed sequence of faces, consumed in order.
    pub fn with_rolls(mut self, rolls: Vec<u32>) -> Self {
        self.rolls = Some(rolls);
        self
    }

    pub fn build(self) -> Result<Game, PigError> {
        Game::from_builder(self)
    }
}

/// What happened as a result of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    /// A face other than 1 was added to the turn total.
    Rolled { face: u32, turn_total: u32 },
    /// A 1 was rolled; the turn total is lost and the die passes.
    Busted { lost: u32 },
    /// The turn total was banked and the die passes.
    Banked { score: u32 },
    /// Banking reached the target.
    Won { winner: PlayerId, score: u32 },
}

enum Dice {
    Random(StdRng),
    Scripted(VecDeque<u32>),
}

/// Two-player Pig engine.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    current_player: PlayerId,
    scores: [u32; NUM_PLAYERS],
    turn_total: u32,
    last_roll: Option<u32>,
    dice: Dice,
}

impl Game {
    pub fn builder(die: u32, target: u32) -> Result<GameBuilder, PigError> {
        GameBuilder::new(die, target)
    }

    pub fn new(config: GameConfig) -> Result<Self, PigError> {
        GameBuilder {
            config,
            rolls: None,
        }
        .build()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn scores(&self) -> [u32; NUM_PLAYERS] {
        self.scores
    }

    pub fn turn_total(&self) -> u32 {
        self.turn_total
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, PigError> {
        if perspective >= NUM_PLAYERS {
            return Err(PigError::InvalidPlayer(perspective));
        }
        Ok(GameStateView {
            settings: self.settings,
            status: self.status,
            self_player: perspective,
            current_player: self.current_player,
            scores: self.scores,
            turn_total: self.turn_total,
            last_roll: self.last_roll,
        })
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, PigError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        self.check_turn(player)?;
        Ok(Action::ALL.to_vec())
    }

    pub fn apply_action(&mut self, player: PlayerId, action: Action) -> Result<TurnEvent, PigError> {
        if self.is_finished() {
            return Err(PigError::GameOver);
        }
        self.check_turn(player)?;
        match action {
            Action::Roll => self.roll(),
            Action::Hold => Ok(self.hold()),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, PigError> {
        let GameBuilder { config, rolls } = builder;
        let settings = GameSettings::new(config.settings.die, config.settings.target)?;
        let dice = match rolls {
            Some(rolls) => {
                if rolls.iter().any(|&face| face == 0 || face > settings.die) {
                    return Err(PigError::InvalidConfiguration(
                        "scripted roll outside the faces of the die",
                    ));
                }
                Dice::Scripted(rolls.into())
            }
            None => Dice::Random(StdRng::seed_from_u64(config.seed)),
        };
        Ok(Game {
            settings,
            status: GameStatus::Ongoing,
            current_player: 0,
            scores: [0; NUM_PLAYERS],
            turn_total: 0,
            last_roll: None,
            dice,
        })
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), PigError> {
        if player >= NUM_PLAYERS {
            return Err(PigError::InvalidPlayer(player));
        }
        if player != self.current_player {
            return Err(PigError::NotPlayersTurn);
        }
        Ok(())
    }

    fn next_face(&mut self) -> Result<u32, PigError> {
        match &mut self.dice {
            Dice::Random(rng) => roll_die(rng, self.settings.die),
            Dice::Scripted(rolls) => rolls.pop_front().ok_or(PigError::DiceExhausted),
        }
    }

    fn roll(&mut self) -> Result<TurnEvent, PigError> {
        let face = self.next_face()?;
        self.last_roll = Some(face);
        if face == 1 {
            let lost = std::mem::take(&mut self.turn_total);
            self.advance_turn();
            return Ok(TurnEvent::Busted { lost });
        }
        self.turn_total = self.turn_total.saturating_add(face);
        Ok(TurnEvent::Rolled {
            face,
            turn_total: self.turn_total,
        })
    }

    fn hold(&mut self) -> TurnEvent {
        let player = self.current_player;
        let banked = std::mem::take(&mut self.turn_total);
        self.scores[player] = self.scores[player].saturating_add(banked);
        let score = self.scores[player];
        if score >= self.settings.target {
            self.status = GameStatus::Finished { winner: player };
            return TurnEvent::Won {
                winner: player,
                score,
            };
        }
        self.advance_turn();
        TurnEvent::Banked { score }
    }

    fn advance_turn(&mut self) {
        self.current_player = (self.current_player + 1) % NUM_PLAYERS;
    }
}
