//! Reactive-signal backing for the core's [`StateCell`] seam.

use leptos::prelude::*;
use pocketbook::StateCell;

/// A [`StateCell`] that writes through to a Leptos signal, so every publish by
/// the sync engine re-renders its readers.
#[derive(Clone, Copy, Debug)]
pub struct SignalCell<T: Send + Sync + 'static>(pub RwSignal<T>);

impl<T: Clone + Send + Sync + 'static> StateCell<T> for SignalCell<T> {
    fn get(&self) -> T {
        self.0.get_untracked()
    }

    fn set(&self, value: T) {
        self.0.set(value);
    }
}
