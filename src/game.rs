use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread::sleep;
use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{self, GameConfig};
use crate::error::SnakeError;
use crate::grid::{Bounds, Position};
use crate::input::InputEvent;
use crate::shutdown::ShutdownSignal;
use crate::snake::Snake;
use crate::term::{CellStyle, Display};

const WALL_CHAR: char = 'W';
const APPLE_CHAR: char = 'A';
const SNAKE_BODY_CHAR: char = 'O';

const APPLE_SCORE: u32 = 10;
const LEVEL_THRESHOLD: u32 = 100;

pub struct SnakeGame {
    bounds: Bounds,
    snake: Snake,
    apple: Position,
    score: u32,
    rules: Rules,
    difficulty: Difficulty,
    rng: StdRng,
    events: Receiver<InputEvent>,
    shutdown: ShutdownSignal,
}

/// Collision switches. Debug mode lets the snake pass the walls, and by
/// default also stops the self collision check.
struct Rules {
    debug: bool,
    ignore_self_collision: bool,
}

impl Rules {
    fn from_config(conf: &GameConfig) -> Self {
        Rules {
            debug: conf.debug,
            ignore_self_collision: conf.debug,
        }
    }
}

/// Score driven pace controller. Scaling is only active on the full
/// screen surface, the plain console keeps its startup level all run.
struct Difficulty {
    level: u8,
    interval: Duration,
    scaling: bool,
}

impl Difficulty {
    fn new(level: u8, scaling: bool) -> Self {
        Difficulty {
            level,
            interval: config::tick_interval(level),
            scaling,
        }
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    /// Called after every apple. Levels up on every 100th point, capped
    /// at the maximum level.
    fn on_apple(&mut self, score: u32) {
        if !self.scaling || self.level >= config::MAX_LEVEL {
            return;
        }

        if score % LEVEL_THRESHOLD == 0 {
            self.level += 1;
            self.interval = config::tick_interval(self.level);
            info!(
                "level up: {} ({}ms per tick)",
                self.level,
                self.interval.as_millis()
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    SelfCollision,
    WallCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved { ate: bool },
    Crashed { reason: GameOverReason, ate: bool },
}

impl TickOutcome {
    fn ate(&self) -> bool {
        matches!(
            self,
            TickOutcome::Moved { ate: true } | TickOutcome::Crashed { ate: true, .. }
        )
    }
}

impl SnakeGame {
    pub fn new(
        conf: &GameConfig,
        bounds: Bounds,
        events: Receiver<InputEvent>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self::with_rng(conf, bounds, events, shutdown, StdRng::from_entropy())
    }

    fn with_rng(
        conf: &GameConfig,
        bounds: Bounds,
        events: Receiver<InputEvent>,
        shutdown: ShutdownSignal,
        mut rng: StdRng,
    ) -> Self {
        let snake = Snake::new(bounds);
        let apple = spawn_apple(bounds, &mut rng);

        SnakeGame {
            bounds,
            snake,
            apple,
            score: 0,
            rules: Rules::from_config(conf),
            difficulty: Difficulty::new(conf.starting_level(), conf.screen),
            rng,
            events,
            shutdown,
        }
    }

    /// Runs the game to completion and hands back the final score. The
    /// shutdown signal is raised on every way out of here.
    pub fn run(&mut self, display: &mut dyn Display) -> Result<u32, SnakeError> {
        let outcome = self.run_loop(display);
        self.shutdown.signal();
        outcome
    }

    ///////////////////////////////////////////////////////////////////////////

    fn run_loop(&mut self, display: &mut dyn Display) -> Result<u32, SnakeError> {
        self.render(display)?;

        loop {
            self.drain_input();
            if self.shutdown.is_signalled() {
                break;
            }

            let outcome = self.tick();

            if outcome.ate() {
                display.beep()?;
            }
            self.render(display)?;

            match outcome {
                TickOutcome::Moved { .. } => sleep(self.difficulty.interval()),
                TickOutcome::Crashed { reason, .. } => {
                    info!("game over: {:?}, final score {}", reason, self.score);
                    break;
                }
            }
        }

        Ok(self.score)
    }

    /// Empties the input queue. Direction events coalesce so only the
    /// latest queued turn counts; a quit event or a dropped sender ends
    /// the run.
    fn drain_input(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(InputEvent::Turn(direction)) => self.snake.queue_turn(direction),
                Ok(InputEvent::Quit) => {
                    info!("quit requested");
                    self.shutdown.signal();
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.shutdown.signal();
                    break;
                }
            }
        }
    }

    /// One simulation step. A fatal collision still finishes the whole
    /// step, walls and apples included, before reporting the crash.
    fn tick(&mut self) -> TickOutcome {
        // The head sits on the apple now, before the move.
        let ate = self.snake.head() == self.apple;

        self.snake.apply_pending();
        let proposed = self.snake.next_head();

        let self_hit = !self.rules.ignore_self_collision && self.snake.collides(proposed);

        let (resolved, wall_hit) = self.bounds.resolve_wall(proposed);
        let new_head = if self.rules.debug { proposed } else { resolved };
        let wall_fatal = wall_hit && !self.rules.debug;

        self.snake.advance(new_head, ate);

        if ate {
            let eaten_at = self.apple;
            self.apple = spawn_apple(self.bounds, &mut self.rng);
            self.score += APPLE_SCORE;
            self.difficulty.on_apple(self.score);
            info!(
                "apple eaten at ({}, {}), score {}",
                eaten_at.x, eaten_at.y, self.score
            );
        }

        if self_hit {
            TickOutcome::Crashed {
                reason: GameOverReason::SelfCollision,
                ate,
            }
        } else if wall_fatal {
            TickOutcome::Crashed {
                reason: GameOverReason::WallCollision,
                ate,
            }
        } else {
            TickOutcome::Moved { ate }
        }
    }

    fn render(&self, display: &mut dyn Display) -> crossterm::Result<()> {
        display.clear()?;

        let score_line = format!("SCORE : {}", self.score);
        for (i, glyph) in score_line.chars().enumerate() {
            display.set_cell(i as u16, 0, glyph, CellStyle::Text)?;
        }

        // The map sits one row below the score line. The apple wins over
        // the wall ring.
        for y in 0..self.bounds.height() {
            for x in 0..self.bounds.width() {
                let pos = Position::new(x, y);
                let (glyph, style) = if pos == self.apple {
                    (APPLE_CHAR, CellStyle::Apple)
                } else if self.bounds.on_wall(pos) {
                    (WALL_CHAR, CellStyle::Wall)
                } else {
                    (' ', CellStyle::Empty)
                };
                display.set_cell(x as u16, y as u16 + 1, glyph, style)?;
            }
        }

        // Body cells go last and win over everything. Cells pushed off
        // the map in no-clip mode are skipped.
        for pos in self.snake.cells() {
            if self.bounds.visible(pos) {
                display.set_cell(pos.x as u16, pos.y as u16 + 1, SNAKE_BODY_CHAR, CellStyle::Snake)?;
            }
        }

        display.present()
    }
}

/// Spawns an apple strictly inside the walls. A cell under the snake is
/// fair game, the apple just stays hidden until the body moves off it.
fn spawn_apple(bounds: Bounds, rng: &mut StdRng) -> Position {
    Position::new(
        rng.gen_range(1..bounds.width() - 1),
        rng.gen_range(1..bounds.height() - 1),
    )
}
