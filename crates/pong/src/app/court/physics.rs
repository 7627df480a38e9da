use tracing::debug;

use super::ai;
use super::types::{Ball, Court, Direction, Paddle, Side, BALL_STEP};

/// Advances the ball one tick and reports which side scored, if any.
///
/// The ball first takes a unit probe move. The AI reacts to the probed `y`,
/// which is then discarded; the probed `x` is kept for the paddle tests and
/// the scaled `BALL_STEP` advance follows. Paddle hits only flip `dx`, so a
/// ball touching both paddles in one tick keeps its direction.
pub(crate) fn step(
    ball: &mut Ball,
    player: &Paddle,
    ai_paddle: &mut Paddle,
    court: Court,
) -> Option<Side> {
    let previous_y = ball.y;

    ball.x += ball.dx.sign();
    ball.y += ball.dy.sign();

    ai::track(ai_paddle, ball.y);

    ball.y = previous_y;

    for paddle in [player, &*ai_paddle] {
        if paddle.overlaps(ball.x, ball.y) {
            ball.dx = ball.dx.flipped();
            debug!(
                paddle = paddle.owner.label(),
                x = ball.x,
                y = ball.y,
                "paddle_hit"
            );
        }
    }

    ball.x += ball.dx.sign() * BALL_STEP;
    ball.y += ball.dy.sign() * BALL_STEP;

    // No re-serve: the ball carries on from where it crossed the line.
    let scorer = if ball.x < 0 {
        ball.dx = Direction::Positive;
        Some(Side::Ai)
    } else if ball.x > court.width {
        ball.dx = Direction::Negative;
        Some(Side::Player)
    } else {
        None
    };

    if ball.y < 0 {
        ball.dy = Direction::Positive;
    } else if ball.y > court.height {
        ball.dy = Direction::Negative;
    }

    scorer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::court::types::{BALL_SIZE, PADDLE_HEIGHT};

    const COURT: Court = Court {
        width: 800,
        height: 600,
    };

    fn ball_at(x: i32, y: i32, dx: Direction, dy: Direction) -> Ball {
        Ball { x, y, dx, dy }
    }

    fn paddles() -> (Paddle, Paddle) {
        (Paddle::player(), Paddle::ai(COURT))
    }

    #[test]
    fn crossing_left_line_scores_for_ai_without_recentering() {
        let (player, mut ai_paddle) = paddles();
        let mut ball = ball_at(5, 300, Direction::Negative, Direction::Positive);

        let scorer = step(&mut ball, &player, &mut ai_paddle, COURT);

        assert_eq!(scorer, Some(Side::Ai));
        assert_eq!(ball.dx, Direction::Positive);
        assert_eq!((ball.x, ball.y), (-6, 310));
    }

    #[test]
    fn crossing_right_line_scores_for_player() {
        let (player, mut ai_paddle) = paddles();
        ai_paddle.y = 400;
        let mut ball = ball_at(795, 100, Direction::Positive, Direction::Negative);

        let scorer = step(&mut ball, &player, &mut ai_paddle, COURT);

        assert_eq!(scorer, Some(Side::Player));
        assert_eq!(ball.dx, Direction::Negative);
        assert_eq!(ball.x, 806);
    }

    #[test]
    fn top_wall_bounces_without_scoring() {
        let (player, mut ai_paddle) = paddles();
        let mut ball = ball_at(400, 5, Direction::Positive, Direction::Negative);

        let scorer = step(&mut ball, &player, &mut ai_paddle, COURT);

        assert_eq!(scorer, None);
        assert_eq!(ball.y, -5);
        assert_eq!(ball.dy, Direction::Positive);
    }

    #[test]
    fn bottom_wall_bounces_without_scoring() {
        let (player, mut ai_paddle) = paddles();
        let mut ball = ball_at(400, 595, Direction::Positive, Direction::Positive);

        let scorer = step(&mut ball, &player, &mut ai_paddle, COURT);

        assert_eq!(scorer, None);
        assert_eq!(ball.y, 605);
        assert_eq!(ball.dy, Direction::Negative);
    }

    #[test]
    fn probe_move_is_discarded_vertically_but_kept_horizontally() {
        let (player, mut ai_paddle) = paddles();
        let mut ball = ball_at(400, 300, Direction::Positive, Direction::Negative);

        step(&mut ball, &player, &mut ai_paddle, COURT);

        assert_eq!(ball.x, 411);
        assert_eq!(ball.y, 290);
    }

    #[test]
    fn ai_reacts_to_probed_y_not_true_position() {
        let (player, mut ai_paddle) = paddles();
        // True y is below centre (299 < 300) but the probe lands exactly on it.
        let mut ball = ball_at(400, 299, Direction::Positive, Direction::Positive);

        step(&mut ball, &player, &mut ai_paddle, COURT);

        assert_eq!(ai_paddle.y, 250);

        let mut ball = ball_at(400, 300, Direction::Positive, Direction::Positive);
        step(&mut ball, &player, &mut ai_paddle, COURT);
        assert_eq!(ai_paddle.y, 256);
    }

    #[test]
    fn player_paddle_hit_flips_dx_before_scaled_advance() {
        let (player, mut ai_paddle) = paddles();
        let mut ball = ball_at(21, 50, Direction::Negative, Direction::Positive);

        let scorer = step(&mut ball, &player, &mut ai_paddle, COURT);

        assert_eq!(scorer, None);
        assert_eq!(ball.dx, Direction::Positive);
        assert_eq!(ball.x, 30);
    }

    fn player_at(y: i32) -> Paddle {
        Paddle {
            owner: Side::Player,
            x: 0,
            y,
        }
    }

    #[test]
    fn collision_ignores_overlap_that_exists_only_at_probed_y() {
        let mut ai_paddle = Paddle::ai(COURT);

        // Probe lands on the top edge (y=80) but the reverted y=79 misses.
        let mut ball = ball_at(15, 79, Direction::Negative, Direction::Positive);
        step(&mut ball, &player_at(100), &mut ai_paddle, COURT);
        assert_eq!(ball.dx, Direction::Negative);
        assert_eq!((ball.x, ball.y), (4, 89));

        // Probe lands on the bottom edge (y=200) but the reverted y=201 misses.
        let mut ball = ball_at(15, 201, Direction::Negative, Direction::Negative);
        step(&mut ball, &player_at(100), &mut ai_paddle, COURT);
        assert_eq!(ball.dx, Direction::Negative);
    }

    #[test]
    fn collision_uses_reverted_y_when_probe_leaves_the_paddle() {
        let mut ai_paddle = Paddle::ai(COURT);
        // Reverted y=200 touches the bottom edge; the probe at y=201 would not.
        let mut ball = ball_at(15, 200, Direction::Negative, Direction::Positive);

        let scorer = step(&mut ball, &player_at(100), &mut ai_paddle, COURT);

        assert_eq!(scorer, None);
        assert_eq!(ball.dx, Direction::Positive);
        assert_eq!((ball.x, ball.y), (24, 210));
    }

    #[test]
    fn ai_paddle_hit_flips_dx() {
        let (player, mut ai_paddle) = paddles();
        let mut ball = ball_at(759, 290, Direction::Positive, Direction::Positive);

        step(&mut ball, &player, &mut ai_paddle, COURT);

        assert_eq!(ball.dx, Direction::Negative);
        assert_eq!(ball.x, 750);
    }

    #[test]
    fn simultaneous_overlap_with_both_paddles_cancels() {
        let court = Court {
            width: 40,
            height: 600,
        };
        let player = Paddle::player();
        let mut ai_paddle = Paddle::ai(court);
        ai_paddle.y = 0;
        let mut ball = ball_at(11, 50, Direction::Positive, Direction::Positive);

        step(&mut ball, &player, &mut ai_paddle, court);

        assert_eq!(ai_paddle.y, 6);
        assert_eq!(ball.dx, Direction::Positive);
        assert_eq!(ball.x, 22);
    }

    /// A ball behind a paddle can still be flipped by it, so it may drift a
    /// little past the line before heading back.
    const OVERSHOOT: i32 = 2 * (BALL_SIZE + BALL_STEP);

    #[test]
    fn long_rally_keeps_positions_small() {
        let (player, mut ai_paddle) = paddles();
        let mut ball = Ball::serve(COURT);

        for _ in 0..10_000 {
            step(&mut ball, &player, &mut ai_paddle, COURT);
            assert!(ball.x >= -OVERSHOOT && ball.x <= COURT.width + OVERSHOOT);
            assert!(ball.y >= -BALL_STEP && ball.y <= COURT.height + BALL_STEP);
            assert!(ai_paddle.y >= -PADDLE_HEIGHT && ai_paddle.y <= COURT.height);
        }
    }
}
