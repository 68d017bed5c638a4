//! The polar hue/saturation selector.

use instant::Instant;
use std::rc::Rc;

use crate::color::Hsv;
use crate::event::{PointerSample, SamplePhase, SelectorError, SelectorUpdate};
use crate::geometry::WheelGeometry;
use crate::observable::{ColorEvent, ObservableColor};
use crate::throttle::{Admission, EventThrottle};

/// Initial wheel color, magenta. Hue 300 points down-left on the wheel, so a
/// freshly shown picker has a visibly off-center indicator.
pub const DEFAULT_WHEEL_COLOR: Hsv = Hsv {
    h: 300.0,
    s: 1.0,
    v: 1.0,
    a: 1.0,
};

/// State machine behind a hue/saturation wheel.
///
/// Owns no rendering. The host feeds it layout via
/// [`ColorWheelState::set_geometry`] and pointer input via
/// [`ColorWheelState::on_pointer_sample`], then reads
/// [`ColorWheelState::indicator_position`] back when painting.
pub struct ColorWheelState {
    geometry: Option<WheelGeometry>,
    throttle: EventThrottle,
    emitter: Rc<ObservableColor>,
    current: Hsv,
    indicator: (f32, f32),
    emit_on_release_only: bool,
    dragging: bool,
}

impl Default for ColorWheelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorWheelState {
    pub fn new() -> Self {
        Self {
            geometry: None,
            throttle: EventThrottle::new(),
            emitter: Rc::new(ObservableColor::new(DEFAULT_WHEEL_COLOR)),
            current: DEFAULT_WHEEL_COLOR,
            indicator: (0.0, 0.0),
            emit_on_release_only: false,
            dragging: false,
        }
    }

    /// The subject downstream components subscribe to.
    pub fn observable(&self) -> &Rc<ObservableColor> {
        &self.emitter
    }

    pub fn color(&self) -> Hsv {
        self.emitter.color()
    }

    pub fn indicator_position(&self) -> (f32, f32) {
        self.indicator
    }

    pub fn geometry(&self) -> Option<WheelGeometry> {
        self.geometry
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn emit_on_release_only(&self) -> bool {
        self.emit_on_release_only
    }

    /// When set, intermediate drag positions update the selector silently
    /// and observers only hear the color fixed at release.
    pub fn set_emit_on_release_only(&mut self, only: bool) {
        self.emit_on_release_only = only;
    }

    pub fn set_min_interval(&mut self, interval: std::time::Duration) {
        self.throttle.set_min_interval(interval);
    }

    /// Install or replace the wheel's layout.
    ///
    /// The current color is kept and its indicator recomputed against the
    /// new geometry, so a relayout never shifts the selection.
    pub fn set_geometry(&mut self, geometry: WheelGeometry) -> Result<SelectorUpdate, SelectorError> {
        self.geometry = Some(geometry);
        self.set_color(self.current, false, false)
    }

    /// Process one pointer sample.
    ///
    /// Fails with [`SelectorError::InvalidGeometry`] until a geometry is
    /// installed. Move samples are rate limited; gesture boundaries are not.
    pub fn on_pointer_sample(
        &mut self,
        sample: PointerSample,
    ) -> Result<SelectorUpdate, SelectorError> {
        if self.geometry.is_none() {
            return Err(SelectorError::InvalidGeometry);
        }

        match sample.phase {
            SamplePhase::Start => {
                self.dragging = true;
                log::debug!("wheel drag started at {:?}", sample.position);
            }
            SamplePhase::End => {
                self.dragging = false;
                log::debug!("wheel drag ended at {:?}", sample.position);
            }
            SamplePhase::Move => {}
        }

        match self.throttle.admit(sample) {
            Admission::Deliver(sample) => self.apply(sample),
            Admission::Deferred => Ok(SelectorUpdate::NONE),
        }
    }

    /// Deadline at which a deferred move sample should be applied.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.next_deadline()
    }

    /// Apply the deferred move sample if it has become due.
    pub fn poll(&mut self, now: Instant) -> Result<SelectorUpdate, SelectorError> {
        match self.throttle.flush(now) {
            Some(sample) => self.apply(sample),
            None => Ok(SelectorUpdate::NONE),
        }
    }

    /// Set the wheel's color programmatically.
    ///
    /// With `from_user` set, the indicator stays put and the color is
    /// re-derived from it, matching how a drag in progress treats an
    /// upstream change. Otherwise the indicator jumps to the given color.
    pub fn set_color(
        &mut self,
        color: Hsv,
        from_user: bool,
        should_propagate: bool,
    ) -> Result<SelectorUpdate, SelectorError> {
        let geometry = self.geometry.ok_or(SelectorError::InvalidGeometry)?;

        let color = color.clamped();
        if from_user {
            self.current = geometry.color_at(self.indicator);
        } else {
            self.indicator = geometry.point_for(color);
            self.current = color;
        }

        self.emit(self.current, from_user, should_propagate)
    }

    fn apply(&mut self, sample: PointerSample) -> Result<SelectorUpdate, SelectorError> {
        // Geometry presence was checked at admission.
        let Some(geometry) = self.geometry else {
            return Err(SelectorError::InvalidGeometry);
        };

        self.indicator = geometry.clamp_point(sample.position);
        self.current = geometry.color_at(self.indicator);
        self.emit(self.current, true, sample.is_release())
    }

    fn emit(
        &mut self,
        color: Hsv,
        from_user: bool,
        should_propagate: bool,
    ) -> Result<SelectorUpdate, SelectorError> {
        if !self.emit_on_release_only || should_propagate {
            self.emitter.notify(ColorEvent {
                color,
                from_user,
                should_propagate,
            })?;
            Ok(SelectorUpdate {
                redraw: true,
                notified: true,
            })
        } else {
            // The selection still tracks the pointer; only the fan-out waits
            // for the release.
            self.emitter.set_quiet(color);
            Ok(SelectorUpdate {
                redraw: true,
                notified: false,
            })
        }
    }
}
