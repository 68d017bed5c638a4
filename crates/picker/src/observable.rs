//! Color change propagation.
//!
//! [`ObservableColor`] is a single-threaded subject: it holds the current
//! color and fans changes out to subscribed observers. Selectors own one and
//! hand out `Rc` clones, so downstream components can subscribe without
//! holding the selector itself.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;

use crate::color::Hsv;

/// Errors raised by observer callbacks. Observers report whatever error type
/// suits them; the subject only aggregates and re-reports.
pub type ObserverError = Box<dyn std::error::Error>;

/// A color change as seen by observers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorEvent {
    pub color: Hsv,
    /// The change originates from direct pointer input on the selector, not
    /// from a programmatic `set_color` or an upstream relay.
    pub from_user: bool,
    /// The change is final for its gesture. Selectors configured to emit
    /// only on release use this to tell the closing sample from
    /// intermediate ones.
    pub should_propagate: bool,
}

pub trait ColorObserver {
    fn on_color(&self, event: ColorEvent) -> Result<(), ObserverError>;
}

impl<F> ColorObserver for F
where
    F: Fn(ColorEvent) -> Result<(), ObserverError>,
{
    fn on_color(&self, event: ColorEvent) -> Result<(), ObserverError> {
        self(event)
    }
}

#[derive(Debug, Error)]
#[error("observer {index} failed: {source}")]
pub struct ObserverFailure {
    /// Position of the failed observer in subscription order at the time of
    /// the notification.
    pub index: usize,
    #[source]
    pub source: ObserverError,
}

/// One or more observers failed during a notification.
///
/// A failing observer never prevents later observers from seeing the event;
/// the subject finishes the fan-out and reports all failures together.
#[derive(Debug, Error)]
#[error("{} of {attempted} observers failed while handling a color change", failures.len())]
pub struct NotifyError {
    pub attempted: usize,
    pub failures: Vec<ObserverFailure>,
}

// Re-notifying with the same color can only come from an observer feeding
// the change back; past this depth the cycle is not converging.
const MAX_NOTIFY_DEPTH: usize = 16;

pub struct ObservableColor {
    color: Cell<Hsv>,
    observers: RefCell<SmallVec<[Rc<dyn ColorObserver>; 2]>>,
    depth: Cell<usize>,
}

impl ObservableColor {
    pub fn new(initial: Hsv) -> Self {
        Self {
            color: Cell::new(initial.clamped()),
            observers: RefCell::new(SmallVec::new()),
            depth: Cell::new(0),
        }
    }

    pub fn color(&self) -> Hsv {
        self.color.get()
    }

    /// Update the stored color without notifying anyone.
    pub fn set_quiet(&self, color: Hsv) {
        self.color.set(color.clamped());
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Subscribe an observer. A second subscription of the same observer is
    /// ignored, so no observer sees an event twice per change.
    pub fn subscribe(&self, observer: Rc<dyn ColorObserver>) {
        let mut observers = self.observers.borrow_mut();
        if observers.iter().any(|o| same_observer(o, &observer)) {
            return;
        }
        observers.push(observer);
    }

    /// Remove an observer. Unknown observers are ignored.
    pub fn unsubscribe(&self, observer: &Rc<dyn ColorObserver>) {
        self.observers
            .borrow_mut()
            .retain(|o| !same_observer(o, observer));
    }

    /// Store the event's color and fan the event out to every observer.
    ///
    /// The stored color updates before the first observer runs, so an
    /// observer that reads back [`ObservableColor::color`] sees the new
    /// value. Every observer is attempted even when an earlier one fails;
    /// failures come back aggregated in one [`NotifyError`].
    pub fn notify(&self, event: ColorEvent) -> Result<(), NotifyError> {
        let event = ColorEvent {
            color: event.color.clamped(),
            ..event
        };

        // An observer notifying back with the color it was just handed is a
        // settled feedback loop; stop it here instead of recursing.
        if self.depth.get() > 0 && event.color == self.color.get() {
            return Ok(());
        }
        if self.depth.get() >= MAX_NOTIFY_DEPTH {
            log::warn!(
                "dropping color notification at depth {}: observer cycle is not converging",
                self.depth.get()
            );
            return Ok(());
        }

        self.color.set(event.color);

        // Snapshot so observers may subscribe or unsubscribe mid-fan-out.
        let snapshot: SmallVec<[Rc<dyn ColorObserver>; 2]> =
            self.observers.borrow().iter().cloned().collect();

        self.depth.set(self.depth.get() + 1);
        let mut failures = Vec::new();
        for (index, observer) in snapshot.iter().enumerate() {
            if let Err(source) = observer.on_color(event) {
                log::error!("color observer {index} failed: {source}");
                failures.push(ObserverFailure { index, source });
            }
        }
        self.depth.set(self.depth.get() - 1);

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError {
                attempted: snapshot.len(),
                failures,
            })
        }
    }
}

impl std::fmt::Debug for ObservableColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableColor")
            .field("color", &self.color.get())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Identity comparison on the data pointer. Comparing fat pointers directly
/// would also compare vtable addresses, which are not stable across
/// codegen units.
fn same_observer(a: &Rc<dyn ColorObserver>, b: &Rc<dyn ColorObserver>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
