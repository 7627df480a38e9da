use super::types::{Side, AI_STARTING_SCORE, PLAYER_STARTING_SCORE, WIN_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScoreTracker {
    player: u32,
    ai: u32,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self {
            player: PLAYER_STARTING_SCORE,
            ai: AI_STARTING_SCORE,
        }
    }
}

impl ScoreTracker {
    #[cfg(test)]
    pub(crate) fn with_scores(player: u32, ai: u32) -> Self {
        Self { player, ai }
    }

    pub(crate) fn player(&self) -> u32 {
        self.player
    }

    pub(crate) fn ai(&self) -> u32 {
        self.ai
    }

    pub(crate) fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player = self.player.saturating_add(1),
            Side::Ai => self.ai = self.ai.saturating_add(1),
        }
    }

    /// Winner once either side reaches the threshold; the player is checked
    /// first.
    pub(crate) fn check_game_end(&self) -> Option<Side> {
        if self.player >= WIN_THRESHOLD {
            Some(Side::Player)
        } else if self.ai >= WIN_THRESHOLD {
            Some(Side::Ai)
        } else {
            None
        }
    }
}
