use super::types::{Paddle, AI_SPEED};

/// Moves the AI paddle one `AI_SPEED` step toward `probe_y`. There is no
/// clamping: the paddle may leave the court.
pub(crate) fn track(ai: &mut Paddle, probe_y: i32) {
    let center = ai.center_y();
    if probe_y > center {
        ai.y += AI_SPEED;
    } else if probe_y < center {
        ai.y -= AI_SPEED;
    }
}
