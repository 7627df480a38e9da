use engine::{Canvas, Rgba, TextStyle};

use super::types::{BALL_SIZE, PADDLE_HEIGHT, PADDLE_WIDTH};
use super::PongSimulation;

const BACKGROUND_COLOR: Rgba = [173, 255, 47, 255];
const FOREGROUND_COLOR: Rgba = [0, 0, 0, 255];
const NET_X: i32 = 400;
const NET_WIDTH: i32 = 15;
const NET_HEIGHT: i32 = 1000;
const SCORE_STYLE: TextStyle = TextStyle::scaled(3);
const SCORE_Y: i32 = 10;
const PLAYER_SCORE_X: i32 = 300;
const AI_SCORE_RIGHT_INSET: i32 = 380;

pub(crate) fn draw_court(simulation: &PongSimulation, canvas: &mut dyn Canvas) {
    let (width, height) = canvas.size();
    canvas.fill_rect(BACKGROUND_COLOR, 0, 0, width as i32, height as i32);
    canvas.fill_rect(FOREGROUND_COLOR, NET_X, 0, NET_WIDTH, NET_HEIGHT);

    for paddle in [&simulation.player, &simulation.ai] {
        canvas.fill_rect(
            FOREGROUND_COLOR,
            paddle.x,
            paddle.y,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        );
    }

    let ball = &simulation.ball;
    canvas.fill_ellipse(FOREGROUND_COLOR, ball.x, ball.y, BALL_SIZE, BALL_SIZE);

    let score = &simulation.score;
    canvas.draw_text(
        &format!("Player: {}", score.player()),
        SCORE_STYLE,
        FOREGROUND_COLOR,
        PLAYER_SCORE_X,
        SCORE_Y,
    );
    canvas.draw_text(
        &format!("AI: {}", score.ai()),
        SCORE_STYLE,
        FOREGROUND_COLOR,
        simulation.court.width - AI_SCORE_RIGHT_INSET,
        SCORE_Y,
    );
}
