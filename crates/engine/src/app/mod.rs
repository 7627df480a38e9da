mod frame;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod surface;

pub use frame::FrameHandle;
pub use input::{ActionStates, InputAction, InputSource, SharedInput};
pub use loop_runner::{
    compute_sleep_ms, run_app, tick_budget_ms, AppError, GameLoop, LoopConfig, LoopExit,
    Simulation, TickOutcome, SLOW_TICK_ENV_VAR,
};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{Canvas, FrameBuffer, Presenter, Rgba, TextStyle};
pub use surface::{
    end_game, resolve_end_game, EndGameAction, EndGameRequest, Notifier, PresentationSurface,
    UiCommand, WindowSurface,
};
