use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};
use winit::event_loop::EventLoopProxy;

/// Terminal notification requested by a simulation when it finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndGameRequest {
    pub message: String,
    pub title: String,
}

/// Work posted from the loop thread to the thread that owns the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Present,
    SetTitle(String),
    EndGame(EndGameRequest),
    Shutdown,
}

/// The window as seen from the loop thread.
pub trait PresentationSurface {
    fn is_disposed(&self) -> bool;
    fn client_size(&self) -> (u32, u32);
    /// Queues `command` on the owner thread. Returns `false` when the owner
    /// is gone; the command is dropped in that case.
    fn invoke_on_owner_thread(&self, command: UiCommand) -> bool;
}

impl<T: PresentationSurface + ?Sized> PresentationSurface for Arc<T> {
    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }

    fn client_size(&self) -> (u32, u32) {
        (**self).client_size()
    }

    fn invoke_on_owner_thread(&self, command: UiCommand) -> bool {
        (**self).invoke_on_owner_thread(command)
    }
}

/// Blocking user-facing message, shown once on the owner thread.
pub trait Notifier {
    fn show_message(&mut self, text: &str, title: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndGameAction {
    Skip,
    Close,
}

/// Loop-side half of the end-of-game handoff.
pub fn end_game(surface: &dyn PresentationSurface, request: EndGameRequest) -> bool {
    if surface.is_disposed() {
        debug!("end_game_skipped_surface_disposed");
        return false;
    }
    let posted = surface.invoke_on_owner_thread(UiCommand::EndGame(request));
    if !posted {
        debug!("end_game_skipped_owner_gone");
    }
    posted
}

/// Owner-side half of the end-of-game handoff. The disposed check runs here
/// too because the window may have closed while the command was queued.
pub fn resolve_end_game(
    disposed: &AtomicBool,
    notifier: &mut dyn Notifier,
    request: &EndGameRequest,
) -> EndGameAction {
    if disposed.load(Ordering::Acquire) {
        return EndGameAction::Skip;
    }
    info!(message = request.message.as_str(), "game_over_notice");
    notifier.show_message(&request.message, &request.title);
    disposed.store(true, Ordering::Release);
    EndGameAction::Close
}

/// `PresentationSurface` over a winit event-loop proxy.
pub struct WindowSurface {
    proxy: EventLoopProxy<UiCommand>,
    disposed: Arc<AtomicBool>,
    client_size: (u32, u32),
}

impl WindowSurface {
    pub(crate) fn new(
        proxy: EventLoopProxy<UiCommand>,
        disposed: Arc<AtomicBool>,
        client_size: (u32, u32),
    ) -> Self {
        Self {
            proxy,
            disposed,
            client_size,
        }
    }
}

impl PresentationSurface for WindowSurface {
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn client_size(&self) -> (u32, u32) {
        self.client_size
    }

    fn invoke_on_owner_thread(&self, command: UiCommand) -> bool {
        self.proxy.send_event(command).is_ok()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{RecordingNotifier, RecordingSurface};
    use super::*;

    fn request() -> EndGameRequest {
        EndGameRequest {
            message: "You win".to_string(),
            title: "Game over".to_string(),
        }
    }

    #[test]
    fn end_game_posts_command_to_live_surface() {
        let surface = RecordingSurface::default();

        assert!(end_game(&surface, request()));
        assert_eq!(surface.commands(), vec![UiCommand::EndGame(request())]);
    }

    #[test]
    fn end_game_on_disposed_surface_is_a_noop() {
        let surface = RecordingSurface::disposed();

        assert!(!end_game(&surface, request()));
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn end_game_tolerates_owner_already_gone() {
        let surface = RecordingSurface::default();
        surface.owner_gone.store(true, Ordering::SeqCst);

        assert!(!end_game(&surface, request()));
    }

    #[test]
    fn resolve_shows_message_once_then_marks_disposed() {
        let disposed = AtomicBool::new(false);
        let mut notifier = RecordingNotifier::default();

        let first = resolve_end_game(&disposed, &mut notifier, &request());
        let second = resolve_end_game(&disposed, &mut notifier, &request());

        assert_eq!(first, EndGameAction::Close);
        assert_eq!(second, EndGameAction::Skip);
        assert_eq!(
            notifier.shown,
            vec![("You win".to_string(), "Game over".to_string())]
        );
        assert!(disposed.load(Ordering::SeqCst));
    }

    #[test]
    fn resolve_skips_when_window_closed_while_queued() {
        let disposed = AtomicBool::new(true);
        let mut notifier = RecordingNotifier::default();

        let action = resolve_end_game(&disposed, &mut notifier, &request());

        assert_eq!(action, EndGameAction::Skip);
        assert!(notifier.shown.is_empty());
    }
}
