use engine::{InputAction, InputSource};

use super::types::{Court, Paddle, PADDLE_HEIGHT, PLAYER_STEP};

/// Moves the player paddle for held Up/Down keys. A move that would leave
/// the court is skipped outright rather than shortened.
pub(crate) fn process_input(paddle: &mut Paddle, court: Court, input: &dyn InputSource) {
    if input.is_key_pressed(InputAction::MoveUp) && paddle.y - PLAYER_STEP >= 0 {
        paddle.y -= PLAYER_STEP;
    }
    if input.is_key_pressed(InputAction::MoveDown)
        && paddle.y + PADDLE_HEIGHT + PLAYER_STEP <= court.height
    {
        paddle.y += PLAYER_STEP;
    }
}
