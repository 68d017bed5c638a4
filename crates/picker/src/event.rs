use instant::Instant;
use thiserror::Error;

use crate::observable::NotifyError;

/// Where in a drag gesture a pointer sample falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplePhase {
    /// The pointer went down on the selector.
    Start,
    /// The pointer moved while held down.
    Move,
    /// The pointer was released, ending the gesture.
    End,
}

/// A single pointer sample in the host's coordinate space.
///
/// The host stamps each sample with the time it observed the input, so the
/// selectors never read a clock themselves and replayed gestures behave
/// identically in tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: (f32, f32),
    pub phase: SamplePhase,
    pub at: Instant,
}

impl PointerSample {
    pub fn start(position: (f32, f32), at: Instant) -> Self {
        Self {
            position,
            phase: SamplePhase::Start,
            at,
        }
    }

    pub fn moved(position: (f32, f32), at: Instant) -> Self {
        Self {
            position,
            phase: SamplePhase::Move,
            at,
        }
    }

    pub fn end(position: (f32, f32), at: Instant) -> Self {
        Self {
            position,
            phase: SamplePhase::End,
            at,
        }
    }

    pub fn is_release(&self) -> bool {
        self.phase == SamplePhase::End
    }
}

/// What a selector did with an input, so the host knows whether to redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectorUpdate {
    /// The indicator or thumb moved and the selector needs repainting.
    pub redraw: bool,
    /// Observers were notified of a color change.
    pub notified: bool,
}

impl SelectorUpdate {
    pub const NONE: Self = Self {
        redraw: false,
        notified: false,
    };
}

#[derive(Debug, Error)]
pub enum SelectorError {
    /// Pointer input arrived before the host supplied a layout.
    #[error("selector geometry has not been set")]
    InvalidGeometry,
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
