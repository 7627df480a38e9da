mod ai;
mod input;
mod physics;
mod render;
mod score;
mod types;

use engine::{Canvas, EndGameRequest, InputSource, Simulation, TickOutcome};
use tracing::{debug, info};

use score::ScoreTracker;
use types::{Ball, Court, GameState, Paddle, Side};

const END_GAME_TITLE: &str = "Game over";
const WIN_MESSAGE: &str = "You win";
const LOSE_MESSAGE: &str = "You lose";

/// All mutable court state. Only the game loop thread touches it.
pub(crate) struct PongSimulation {
    court: Court,
    player: Paddle,
    ai: Paddle,
    ball: Ball,
    score: ScoreTracker,
    state: GameState,
}

impl PongSimulation {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let court = Court::from_window(width, height);
        Self {
            court,
            player: Paddle::player(),
            ai: Paddle::ai(court),
            ball: Ball::serve(court),
            score: ScoreTracker::default(),
            state: GameState::Running,
        }
    }

    fn award_point(&mut self, scorer: Side) -> TickOutcome {
        self.score.award(scorer);
        info!(
            scorer = scorer.label(),
            player_score = self.score.player(),
            ai_score = self.score.ai(),
            "point_scored"
        );

        let Some(winner) = self.score.check_game_end() else {
            return TickOutcome::Continue;
        };
        self.state = GameState::Ended(winner);
        info!(
            winner = winner.label(),
            player_score = self.score.player(),
            ai_score = self.score.ai(),
            "game_over"
        );
        TickOutcome::Finished(end_game_request(winner))
    }
}

impl Simulation for PongSimulation {
    fn process_input(&mut self, input: &dyn InputSource) {
        if self.state == GameState::Running {
            input::process_input(&mut self.player, self.court, input);
        }
    }

    fn update(&mut self) -> TickOutcome {
        if let GameState::Ended(winner) = self.state {
            debug!(winner = winner.label(), "update_after_game_over");
            return TickOutcome::Continue;
        }
        match physics::step(&mut self.ball, &self.player, &mut self.ai, self.court) {
            Some(scorer) => self.award_point(scorer),
            None => TickOutcome::Continue,
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        render::draw_court(self, canvas);
    }

    fn window_title(&self) -> Option<String> {
        Some(format!(
            "Pong | Player {} - AI {}",
            self.score.player(),
            self.score.ai()
        ))
    }
}

fn end_game_request(winner: Side) -> EndGameRequest {
    let message = match winner {
        Side::Player => WIN_MESSAGE,
        Side::Ai => LOSE_MESSAGE,
    };
    EndGameRequest {
        message: message.to_string(),
        title: END_GAME_TITLE.to_string(),
    }
}
