pub(crate) const PADDLE_WIDTH: i32 = 20;
pub(crate) const PADDLE_HEIGHT: i32 = 100;
pub(crate) const BALL_SIZE: i32 = 20;
/// Ball displacement per tick after the unit probe move.
pub(crate) const BALL_STEP: i32 = 10;
pub(crate) const PLAYER_STEP: i32 = 10;
pub(crate) const AI_SPEED: i32 = 6;
pub(crate) const WIN_THRESHOLD: u32 = 11;
pub(crate) const PLAYER_STARTING_SCORE: u32 = 10;
pub(crate) const AI_STARTING_SCORE: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Court {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Court {
    pub(crate) fn from_window(width: u32, height: u32) -> Self {
        Self {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Player,
    Ai,
}

impl Side {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Ai => "ai",
        }
    }
}

/// One axis of ball velocity. Only unit magnitudes exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Negative,
    Positive,
}

impl Direction {
    pub(crate) fn sign(self) -> i32 {
        match self {
            Direction::Negative => -1,
            Direction::Positive => 1,
        }
    }

    pub(crate) fn flipped(self) -> Self {
        match self {
            Direction::Negative => Direction::Positive,
            Direction::Positive => Direction::Negative,
        }
    }
}

/// Top-left anchored, `PADDLE_WIDTH` x `PADDLE_HEIGHT`. Only `y` moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paddle {
    pub(crate) owner: Side,
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Paddle {
    pub(crate) fn player() -> Self {
        Self {
            owner: Side::Player,
            x: 0,
            y: 0,
        }
    }

    pub(crate) fn ai(court: Court) -> Self {
        Self {
            owner: Side::Ai,
            x: court.width - PADDLE_WIDTH,
            y: court.height / 2 - PADDLE_HEIGHT / 2,
        }
    }

    pub(crate) fn center_y(&self) -> i32 {
        self.y + PADDLE_HEIGHT / 2
    }

    /// Inclusive box test against a ball at (`ball_x`, `ball_y`).
    pub(crate) fn overlaps(&self, ball_x: i32, ball_y: i32) -> bool {
        ball_x + BALL_SIZE >= self.x
            && ball_x <= self.x + PADDLE_WIDTH
            && ball_y + BALL_SIZE >= self.y
            && ball_y <= self.y + PADDLE_HEIGHT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ball {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) dx: Direction,
    pub(crate) dy: Direction,
}

impl Ball {
    pub(crate) fn serve(court: Court) -> Self {
        Self {
            x: court.width / 2,
            y: court.height / 2,
            dx: Direction::Positive,
            dy: Direction::Positive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameState {
    Running,
    Ended(Side),
}
