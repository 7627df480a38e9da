use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{debug, info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::window::{Window, WindowBuilder};

use super::metrics::MetricsAccumulator;
use super::rendering::draw_notice;
use super::surface::{end_game, resolve_end_game, EndGameAction, Notifier, WindowSurface};
use super::{
    Canvas, EndGameRequest, FrameBuffer, FrameHandle, InputAction, InputSource,
    PresentationSurface, Presenter, SharedInput, UiCommand,
};

pub const SLOW_TICK_ENV_VAR: &str = "PONG_SLOW_TICK_MS";

const MIN_SLEEP_MS: u64 = 1;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub metrics_log_interval: Duration,
    pub simulated_slow_tick_ms: u64,
    pub notification_hold: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Pong".to_string(),
            window_width: 800,
            window_height: 600,
            target_tps: 60,
            metrics_log_interval: Duration::from_secs(1),
            simulated_slow_tick_ms: 0,
            notification_hold: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("failed to spawn game loop thread: {0}")]
    SpawnLoop(#[source] std::io::Error),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
    #[error("game loop thread panicked")]
    LoopPanicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Finished(EndGameRequest),
}

/// State machine driven by `GameLoop`, one call of each method per tick.
pub trait Simulation: Send {
    fn process_input(&mut self, input: &dyn InputSource);
    fn update(&mut self) -> TickOutcome;
    fn render(&self, canvas: &mut dyn Canvas);
    fn window_title(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    SurfaceDisposed,
    GameEnded,
}

/// Fixed-cadence scheduler: input, update, render, then sleep out the rest
/// of the tick budget. Overruns are not compensated.
pub struct GameLoop {
    simulation: Box<dyn Simulation>,
    input: Box<dyn InputSource + Send>,
    surface: Box<dyn PresentationSurface + Send>,
    frames: FrameHandle,
    canvas: FrameBuffer,
    tick_budget_ms: u64,
    slow_tick_delay: Duration,
    metrics_log_interval: Duration,
    last_title: Option<String>,
}

impl GameLoop {
    pub fn new(
        config: &LoopConfig,
        simulation: Box<dyn Simulation>,
        input: Box<dyn InputSource + Send>,
        surface: Box<dyn PresentationSurface + Send>,
        frames: FrameHandle,
    ) -> Self {
        let (width, height) = surface.client_size();
        Self {
            simulation,
            input,
            surface,
            frames,
            canvas: FrameBuffer::new(width, height),
            tick_budget_ms: tick_budget_ms(config.target_tps),
            slow_tick_delay: resolve_slow_tick_delay(config.simulated_slow_tick_ms),
            metrics_log_interval: normalize_non_zero_duration(
                config.metrics_log_interval,
                Duration::from_secs(1),
            ),
            last_title: None,
        }
    }

    /// Spawns the loop on its own thread and returns immediately.
    pub fn start(self) -> Result<JoinHandle<LoopExit>, AppError> {
        thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || self.run())
            .map_err(AppError::SpawnLoop)
    }

    pub fn run(mut self) -> LoopExit {
        let budget = Duration::from_millis(self.tick_budget_ms);
        let mut metrics = MetricsAccumulator::new(self.metrics_log_interval);
        info!(
            tick_budget_ms = self.tick_budget_ms,
            slow_tick_delay_ms = saturating_millis(self.slow_tick_delay),
            "loop_started"
        );

        loop {
            let tick_started = Instant::now();
            let outcome = self.tick();
            if self.slow_tick_delay > Duration::ZERO {
                // Explicit debug perturbation only.
                thread::sleep(self.slow_tick_delay);
            }
            let elapsed = tick_started.elapsed();

            metrics.record_tick(elapsed, budget);
            if let Some(snapshot) = metrics.maybe_snapshot(Instant::now()) {
                info!(
                    tps = snapshot.tps,
                    tick_time_ms = snapshot.tick_time_ms,
                    overruns = snapshot.overruns,
                    "loop_metrics"
                );
            }

            if let TickOutcome::Finished(request) = outcome {
                info!(message = request.message.as_str(), "loop_finished");
                end_game(self.surface.as_ref(), request);
                return LoopExit::GameEnded;
            }

            let sleep_ms = compute_sleep_ms(saturating_millis(elapsed), self.tick_budget_ms);
            thread::sleep(Duration::from_millis(sleep_ms));

            if self.surface.is_disposed() {
                info!(reason = "surface_disposed", "loop_stopped");
                self.surface.invoke_on_owner_thread(UiCommand::Shutdown);
                return LoopExit::SurfaceDisposed;
            }
        }
    }

    fn tick(&mut self) -> TickOutcome {
        self.simulation.process_input(self.input.as_ref());
        let outcome = self.simulation.update();

        self.simulation.render(&mut self.canvas);
        self.frames.publish(&self.canvas);
        self.surface.invoke_on_owner_thread(UiCommand::Present);

        let title = self.simulation.window_title();
        if title != self.last_title {
            if let Some(next) = &title {
                self.surface
                    .invoke_on_owner_thread(UiCommand::SetTitle(next.clone()));
            }
            self.last_title = title;
        }

        outcome
    }
}

/// Opens the window, starts the game loop thread and services the window
/// until it closes. Returns `Ok(())` for a user close and for game over.
pub fn run_app(config: LoopConfig, simulation: Box<dyn Simulation>) -> Result<(), AppError> {
    let event_loop = EventLoopBuilder::<UiCommand>::with_user_event()
        .build()
        .map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut presenter = Presenter::new(
        Arc::clone(&window),
        config.window_width,
        config.window_height,
    )
    .map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Wait);

    let disposed = Arc::new(AtomicBool::new(false));
    let input = SharedInput::default();
    let frames = FrameHandle::new(config.window_width, config.window_height);
    let surface = WindowSurface::new(
        event_loop.create_proxy(),
        Arc::clone(&disposed),
        (config.window_width, config.window_height),
    );
    let game_loop = GameLoop::new(
        &config,
        simulation,
        Box::new(input.clone()),
        Box::new(surface),
        frames.clone(),
    );
    info!(
        width = config.window_width,
        height = config.window_height,
        target_tps = config.target_tps,
        "window_opened"
    );
    let loop_handle = game_loop.start()?;
    let loop_disposed = Arc::clone(&disposed);
    let notification_hold = config.notification_hold;

    let result = event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    disposed.store(true, Ordering::Release);
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(size) => {
                    if let Err(error) = presenter.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        disposed.store(true, Ordering::Release);
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = presenter.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        disposed.store(true, Ordering::Release);
                        window_target.exit();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let is_pressed = event.state == ElementState::Pressed;
                    let action = input.handle_physical_key(event.physical_key, is_pressed);
                    if is_pressed && action == Some(InputAction::Quit) {
                        disposed.store(true, Ordering::Release);
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Err(error) = frames.with_latest(|frame| presenter.present(frame)) {
                        warn!(error = %error, "renderer_draw_failed");
                        disposed.store(true, Ordering::Release);
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::UserEvent(command) => match command {
                UiCommand::Present => window.request_redraw(),
                UiCommand::SetTitle(title) => window.set_title(&title),
                UiCommand::EndGame(request) => {
                    let mut notifier = WindowNotifier {
                        window: &window,
                        presenter: &mut presenter,
                        frames: &frames,
                        hold: notification_hold,
                    };
                    match resolve_end_game(&disposed, &mut notifier, &request) {
                        EndGameAction::Close => {
                            window.set_visible(false);
                            info!(reason = "game_over", "shutdown_requested");
                            window_target.exit();
                        }
                        EndGameAction::Skip => debug!("end_game_skipped_window_closed"),
                    }
                }
                UiCommand::Shutdown => {
                    disposed.store(true, Ordering::Release);
                    window_target.exit();
                }
            },
            Event::LoopExiting => {
                disposed.store(true, Ordering::Release);
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun);

    let joined = stop_game_loop(&loop_disposed, loop_handle);
    result?;
    joined.map(|_| ())
}

/// Marks the surface disposed so the loop thread winds down, then joins it.
/// The event loop may return without `LoopExiting`, so this runs on every
/// exit path.
fn stop_game_loop(
    disposed: &AtomicBool,
    handle: JoinHandle<LoopExit>,
) -> Result<LoopExit, AppError> {
    disposed.store(true, Ordering::Release);
    match handle.join() {
        Ok(exit) => {
            info!(exit = ?exit, "game_loop_joined");
            Ok(exit)
        }
        Err(_) => {
            tracing::error!("game_loop_panicked");
            Err(AppError::LoopPanicked)
        }
    }
}

/// Shows the end-of-game message inside the window and holds it there,
/// blocking the window thread like a modal would.
struct WindowNotifier<'a> {
    window: &'a Window,
    presenter: &'a mut Presenter,
    frames: &'a FrameHandle,
    hold: Duration,
}

impl Notifier for WindowNotifier<'_> {
    fn show_message(&mut self, text: &str, title: &str) {
        self.window.set_title(title);
        self.frames.with_latest_mut(|frame| draw_notice(frame, text));
        if let Err(error) = self
            .frames
            .with_latest(|frame| self.presenter.present(frame))
        {
            warn!(error = %error, "renderer_draw_failed");
        }
        thread::sleep(self.hold);
    }
}

/// Integer milliseconds per tick, e.g. 16 at 60 tps.
pub fn tick_budget_ms(target_tps: u32) -> u64 {
    1000 / u64::from(target_tps.max(1))
}

/// Remaining budget, never less than one millisecond.
pub fn compute_sleep_ms(elapsed_ms: u64, budget_ms: u64) -> u64 {
    budget_ms.saturating_sub(elapsed_ms).max(MIN_SLEEP_MS)
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn resolve_slow_tick_delay(config_slow_tick_ms: u64) -> Duration {
    match env::var(SLOW_TICK_ENV_VAR) {
        Ok(value) => parse_slow_tick_ms(&value, config_slow_tick_ms),
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_tick_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_TICK_ENV_VAR,
                error = %err,
                "unable to read slow-tick env var; falling back to config"
            );
            Duration::from_millis(config_slow_tick_ms)
        }
    }
}

fn parse_slow_tick_ms(value: &str, config_slow_tick_ms: u64) -> Duration {
    match value.trim().parse::<u64>() {
        Ok(ms) => Duration::from_millis(ms),
        Err(_) => {
            warn!(
                env_var = SLOW_TICK_ENV_VAR,
                value, "invalid slow-tick env var value; falling back to config"
            );
            Duration::from_millis(config_slow_tick_ms)
        }
    }
}
