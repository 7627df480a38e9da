use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::warn;
use winit::keyboard::{KeyCode, PhysicalKey};

static INPUT_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_input_lock_poison_once(operation: &'static str) {
    if INPUT_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "input lock poisoned; recovered inner value");
    }
}

/// Logical keys the simulation can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    Quit,
}

const ACTION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::Quit => 2,
        }
    }

    pub fn from_physical_key(key: PhysicalKey) -> Option<Self> {
        match key {
            PhysicalKey::Code(KeyCode::KeyW) | PhysicalKey::Code(KeyCode::ArrowUp) => {
                Some(InputAction::MoveUp)
            }
            PhysicalKey::Code(KeyCode::KeyS) | PhysicalKey::Code(KeyCode::ArrowDown) => {
                Some(InputAction::MoveDown)
            }
            PhysicalKey::Code(KeyCode::Escape) => Some(InputAction::Quit),
            _ => None,
        }
    }
}

/// Reports whether a logical key is currently held.
pub trait InputSource {
    fn is_key_pressed(&self, action: InputAction) -> bool;
}

impl InputSource for ActionStates {
    fn is_key_pressed(&self, action: InputAction) -> bool {
        self.is_down(action)
    }
}

/// Keyboard state shared between the window thread (writer) and the loop
/// thread (reader).
#[derive(Clone, Debug, Default)]
pub struct SharedInput {
    states: Arc<RwLock<ActionStates>>,
}

impl SharedInput {
    pub fn snapshot(&self) -> ActionStates {
        match self.states.read() {
            Ok(guard) => *guard,
            Err(poisoned) => {
                warn_input_lock_poison_once("read");
                *poisoned.into_inner()
            }
        }
    }

    pub fn set(&self, action: InputAction, is_down: bool) {
        match self.states.write() {
            Ok(mut guard) => guard.set(action, is_down),
            Err(poisoned) => {
                warn_input_lock_poison_once("write");
                poisoned.into_inner().set(action, is_down);
            }
        }
    }

    /// Applies a raw key event; returns the mapped action, if any.
    pub(crate) fn handle_physical_key(
        &self,
        key: PhysicalKey,
        is_pressed: bool,
    ) -> Option<InputAction> {
        let action = InputAction::from_physical_key(key)?;
        self.set(action, is_pressed);
        Some(action)
    }
}

impl InputSource for SharedInput {
    fn is_key_pressed(&self, action: InputAction) -> bool {
        self.snapshot().is_down(action)
    }
}
