use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::warn;

use super::FrameBuffer;

static FRAME_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_frame_lock_poison_once(operation: &'static str) {
    if FRAME_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "frame lock poisoned; recovered inner value");
    }
}

/// Single-slot hand-off of the most recently rendered frame from the loop
/// thread to the window thread. Publishing copies, so readers never observe
/// a half-drawn frame.
#[derive(Clone, Debug)]
pub struct FrameHandle {
    latest: Arc<RwLock<FrameBuffer>>,
}

impl FrameHandle {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            latest: Arc::new(RwLock::new(FrameBuffer::new(width, height))),
        }
    }

    pub fn publish(&self, frame: &FrameBuffer) {
        match self.latest.write() {
            Ok(mut guard) => guard.clone_from(frame),
            Err(poisoned) => {
                warn_frame_lock_poison_once("write");
                poisoned.into_inner().clone_from(frame);
            }
        }
    }

    pub fn with_latest<R>(&self, read: impl FnOnce(&FrameBuffer) -> R) -> R {
        match self.latest.read() {
            Ok(guard) => read(&guard),
            Err(poisoned) => {
                warn_frame_lock_poison_once("read");
                read(&poisoned.into_inner())
            }
        }
    }

    pub(crate) fn with_latest_mut<R>(&self, edit: impl FnOnce(&mut FrameBuffer) -> R) -> R {
        match self.latest.write() {
            Ok(mut guard) => edit(&mut guard),
            Err(poisoned) => {
                warn_frame_lock_poison_once("write");
                edit(&mut poisoned.into_inner())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::app::Canvas;

    const BLUE: [u8; 4] = [0, 0, 255, 255];

    #[test]
    fn published_frame_is_visible_to_clones() {
        let handle = FrameHandle::new(4, 4);
        let reader = handle.clone();
        let mut frame = FrameBuffer::new(4, 4);
        frame.fill_rect(BLUE, 0, 0, 1, 1);

        handle.publish(&frame);

        assert_eq!(reader.with_latest(|latest| latest.pixel(0, 0)), Some(BLUE));
    }

    #[test]
    fn later_edits_to_source_do_not_leak_into_published_copy() {
        let handle = FrameHandle::new(2, 2);
        let mut frame = FrameBuffer::new(2, 2);
        handle.publish(&frame);
        frame.clear(BLUE);

        assert_eq!(
            handle.with_latest(|latest| latest.pixel(1, 1)),
            Some([0, 0, 0, 0])
        );
    }

    #[test]
    fn publish_recovers_after_poison_without_panic() {
        let handle = FrameHandle::new(2, 2);
        thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = handle.latest.write().expect("write guard");
                    panic!("poison frame lock");
                })
                .join();
        });

        let mut frame = FrameBuffer::new(2, 2);
        frame.clear(BLUE);
        handle.publish(&frame);

        assert_eq!(handle.with_latest(|latest| latest.pixel(0, 1)), Some(BLUE));
    }
}
