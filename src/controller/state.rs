// SPDX-License-Identifier: GPL-3.0-only

//! Observable capture state
//!
//! [`StateCell`] is a single-writer value holder with whole-value replace
//! semantics. Readers either take a snapshot, hold a `watch` receiver, or
//! consume a stream of snapshots. A reader never sees a half-applied update.

use crate::backends::CapturedImage;
use futures::Stream;
use tokio::sync::watch;

/// Screen-level capture state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureState {
    /// Photo pending review; `None` while the live preview is showing
    pub captured_image: Option<CapturedImage>,
}

/// Which of the two screens the state maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    /// Live camera preview
    Live,
    /// A just-captured photo is waiting to be saved or dismissed
    Reviewing,
}

impl CaptureState {
    pub fn phase(&self) -> CapturePhase {
        match self.captured_image {
            Some(_) => CapturePhase::Reviewing,
            None => CapturePhase::Live,
        }
    }

    pub fn is_reviewing(&self) -> bool {
        self.phase() == CapturePhase::Reviewing
    }
}

/// Publish/subscribe value holder
pub struct StateCell<T> {
    sender: watch::Sender<T>,
}

impl<T> StateCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replace the whole value, returning the previous one
    ///
    /// Subscribers are notified even when the value is unchanged.
    pub fn replace(&self, value: T) -> T {
        self.sender.send_replace(value)
    }

    /// Mutate in place; subscribers are notified only if `f` returns true
    pub fn modify<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        self.sender.send_if_modified(f)
    }

    /// Receiver that observes every future replacement
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Stream of snapshots, starting with the current value
    ///
    /// Intermediate values may be skipped when the consumer is slower than
    /// the writer; the latest value is always delivered.
    pub fn changes(&self) -> impl Stream<Item = T> + Send + 'static {
        let mut receiver = self.sender.subscribe();
        async_stream::stream! {
            loop {
                let value = receiver.borrow_and_update().clone();
                yield value;
                if receiver.changed().await.is_err() {
                    break;
                }
            }
        }
    }
}

impl<T> Default for StateCell<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StateCell").field(&*self.sender.borrow()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[test]
    fn test_replace_returns_previous() {
        let cell = StateCell::new(1u32);
        assert_eq!(cell.replace(2), 1);
        assert_eq!(cell.get(), 2);
    }

    #[tokio::test]
    async fn test_subscriber_sees_replacement() {
        let cell = StateCell::new(String::from("a"));
        let mut receiver = cell.subscribe();
        cell.replace(String::from("b"));
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), "b");
    }

    #[test]
    fn test_modify_without_change_does_not_notify() {
        let cell = StateCell::new(5u8);
        let receiver = cell.subscribe();
        assert!(!cell.modify(|_| false));
        assert!(!receiver.has_changed().unwrap());
        assert!(cell.modify(|v| {
            *v = 6;
            true
        }));
        assert!(receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_changes_starts_with_current_value() {
        let cell = StateCell::new(10i32);
        let mut changes = Box::pin(cell.changes());
        assert_eq!(changes.next().await, Some(10));
        cell.replace(11);
        assert_eq!(changes.next().await, Some(11));
        drop(cell);
        assert_eq!(changes.next().await, None);
    }

    #[test]
    fn test_phase_follows_captured_image() {
        let mut state = CaptureState::default();
        assert_eq!(state.phase(), CapturePhase::Live);
        state.captured_image = Some(CapturedImage::new(image::RgbaImage::new(1, 1)));
        assert!(state.is_reviewing());
    }
}
