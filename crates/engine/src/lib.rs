//! Windowing, input, frame presentation and the fixed-rate game loop.
//!
//! A game implements [`Simulation`]; [`run_app`] opens the window on the
//! calling thread and drives the simulation from a dedicated loop thread.

pub mod app;

pub use app::{
    compute_sleep_ms, end_game, resolve_end_game, run_app, tick_budget_ms, ActionStates, AppError,
    Canvas, EndGameAction, EndGameRequest, FrameBuffer, FrameHandle, GameLoop, InputAction,
    InputSource, LoopConfig, LoopExit, LoopMetricsSnapshot, Notifier, PresentationSurface,
    Presenter, Rgba, SharedInput, Simulation, TextStyle, TickOutcome, UiCommand, WindowSurface,
    SLOW_TICK_ENV_VAR,
};
