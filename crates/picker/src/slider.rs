//! Linear channel sliders.
//!
//! A slider edits exactly one channel of a base color. Which channel is a
//! [`SliderChannel`] strategy, so brightness and alpha sliders share every
//! line of gesture, throttling, and propagation logic.

use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;

use crate::binding::ColorBinding;
use crate::color::Hsv;
use crate::event::{PointerSample, SamplePhase, SelectorError, SelectorUpdate};
use crate::geometry::SliderTrack;
use crate::observable::{ColorEvent, ObservableColor};
use crate::throttle::{Admission, EventThrottle};

/// Base color a fresh slider edits, opaque white at full value.
pub const DEFAULT_SLIDER_COLOR: Hsv = Hsv {
    h: 0.0,
    s: 0.0,
    v: 1.0,
    a: 1.0,
};

/// The channel a slider edits.
pub trait SliderChannel: 'static {
    /// Extract this channel's value from a color.
    fn resolve(&self, color: Hsv) -> f32;
    /// Write `value` into this channel of `base`.
    fn assemble(&self, base: Hsv, value: f32) -> Hsv;
    fn name(&self) -> &'static str;
}

/// Edits the HSV value channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrightnessChannel;

impl SliderChannel for BrightnessChannel {
    fn resolve(&self, color: Hsv) -> f32 {
        color.v
    }

    fn assemble(&self, base: Hsv, value: f32) -> Hsv {
        Hsv { v: value, ..base }.clamped()
    }

    fn name(&self) -> &'static str {
        "brightness"
    }
}

/// Edits the alpha channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphaChannel;

impl SliderChannel for AlphaChannel {
    fn resolve(&self, color: Hsv) -> f32 {
        color.a
    }

    fn assemble(&self, base: Hsv, value: f32) -> Hsv {
        base.with_alpha(value)
    }

    fn name(&self) -> &'static str {
        "alpha"
    }
}

pub struct ColorSliderState {
    track: Option<SliderTrack>,
    throttle: EventThrottle,
    emitter: Rc<ObservableColor>,
    channel: Rc<dyn SliderChannel>,
    base_color: Hsv,
    value: f32,
    emit_on_release_only: bool,
    dragging: bool,
    binding: Option<ColorBinding>,
}

impl ColorSliderState {
    fn new(channel: Rc<dyn SliderChannel>) -> Self {
        Self {
            track: None,
            throttle: EventThrottle::new(),
            emitter: Rc::new(ObservableColor::new(DEFAULT_SLIDER_COLOR)),
            channel,
            base_color: DEFAULT_SLIDER_COLOR,
            value: 1.0,
            emit_on_release_only: false,
            dragging: false,
            binding: None,
        }
    }

    pub fn observable(&self) -> &Rc<ObservableColor> {
        &self.emitter
    }

    pub fn color(&self) -> Hsv {
        self.emitter.color()
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn base_color(&self) -> Hsv {
        self.base_color
    }

    pub fn channel_name(&self) -> &'static str {
        self.channel.name()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn track(&self) -> Option<SliderTrack> {
        self.track
    }

    /// Absolute x position of the thumb, once a track is installed.
    pub fn thumb_position(&self) -> Option<f32> {
        self.track.map(|track| track.position_for(self.value))
    }

    pub fn emit_on_release_only(&self) -> bool {
        self.emit_on_release_only
    }

    pub fn set_emit_on_release_only(&mut self, only: bool) {
        self.emit_on_release_only = only;
    }

    pub fn set_min_interval(&mut self, interval: std::time::Duration) {
        self.throttle.set_min_interval(interval);
    }

    /// Install or replace the slider's track. The value is kept, so the
    /// thumb lands at the same fraction of the new track.
    pub fn set_track(&mut self, track: SliderTrack) -> Result<SelectorUpdate, SelectorError> {
        self.track = Some(track);
        let current = self.channel.assemble(self.base_color, self.value);
        self.emit(current, false, false)
    }

    pub fn on_pointer_sample(
        &mut self,
        sample: PointerSample,
    ) -> Result<SelectorUpdate, SelectorError> {
        if self.track.is_none() {
            return Err(SelectorError::InvalidGeometry);
        }

        match sample.phase {
            SamplePhase::Start => {
                self.dragging = true;
                log::debug!("{} drag started at {:?}", self.channel.name(), sample.position);
            }
            SamplePhase::End => {
                self.dragging = false;
                log::debug!("{} drag ended at {:?}", self.channel.name(), sample.position);
            }
            SamplePhase::Move => {}
        }

        match self.throttle.admit(sample) {
            Admission::Deliver(sample) => self.apply(sample),
            Admission::Deferred => Ok(SelectorUpdate::NONE),
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.next_deadline()
    }

    pub fn poll(&mut self, now: Instant) -> Result<SelectorUpdate, SelectorError> {
        match self.throttle.flush(now) {
            Some(sample) => self.apply(sample),
            None => Ok(SelectorUpdate::NONE),
        }
    }

    /// Set the slider's color.
    ///
    /// A user-attributed change keeps the slider's own value and rewrites
    /// that channel of the incoming color; any other change adopts the
    /// color wholesale and moves the thumb to its channel value. Sliders
    /// have no geometry precondition for this path: a track is only needed
    /// to place the thumb, not to hold a color.
    pub fn set_color(
        &mut self,
        color: Hsv,
        from_user: bool,
        should_propagate: bool,
    ) -> Result<SelectorUpdate, SelectorError> {
        let color = color.clamped();
        self.base_color = color;

        let target = if from_user {
            self.channel.assemble(color, self.value)
        } else {
            self.value = self.channel.resolve(color);
            color
        };

        self.emit(target, from_user, should_propagate)
    }

    fn apply(&mut self, sample: PointerSample) -> Result<SelectorUpdate, SelectorError> {
        let Some(track) = self.track else {
            return Err(SelectorError::InvalidGeometry);
        };

        self.value = track.value_at(sample.position.0);
        let color = self.channel.assemble(self.base_color, self.value);
        self.emit(color, true, sample.is_release())
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
            self.emitter.set_quiet(color);
            Ok(SelectorUpdate {
                redraw: true,
                notified: false,
            })
        }
    }
}

impl std::fmt::Debug for ColorSliderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorSliderState")
            .field("channel", &self.channel.name())
            .field("value", &self.value)
            .field("base_color", &self.base_color)
            .field("dragging", &self.dragging)
            .finish()
    }
}

/// Shared handle to a slider.
///
/// The state lives behind `Rc<RefCell>` so an upstream binding can reach
/// the slider while the host keeps using it. Clones are cheap and refer to
/// the same slider.
#[derive(Clone)]
pub struct ColorSlider {
    state: Rc<RefCell<ColorSliderState>>,
}

impl ColorSlider {
    pub fn new(channel: impl SliderChannel) -> Self {
        Self {
            state: Rc::new(RefCell::new(ColorSliderState::new(Rc::new(channel)))),
        }
    }

    pub fn brightness() -> Self {
        Self::new(BrightnessChannel)
    }

    pub fn alpha() -> Self {
        Self::new(AlphaChannel)
    }

    pub fn observable(&self) -> Rc<ObservableColor> {
        self.state.borrow().observable().clone()
    }

    pub fn color(&self) -> Hsv {
        self.state.borrow().color()
    }

    pub fn value(&self) -> f32 {
        self.state.borrow().value()
    }

    pub fn base_color(&self) -> Hsv {
        self.state.borrow().base_color()
    }

    pub fn channel_name(&self) -> &'static str {
        self.state.borrow().channel_name()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().is_dragging()
    }

    pub fn thumb_position(&self) -> Option<f32> {
        self.state.borrow().thumb_position()
    }

    pub fn emit_on_release_only(&self) -> bool {
        self.state.borrow().emit_on_release_only()
    }

    pub fn set_emit_on_release_only(&self, only: bool) {
        self.state.borrow_mut().set_emit_on_release_only(only);
    }

    pub fn set_min_interval(&self, interval: std::time::Duration) {
        self.state.borrow_mut().set_min_interval(interval);
    }

    pub fn set_track(&self, track: SliderTrack) -> Result<SelectorUpdate, SelectorError> {
        self.state.borrow_mut().set_track(track)
    }

    pub fn on_pointer_sample(
        &self,
        sample: PointerSample,
    ) -> Result<SelectorUpdate, SelectorError> {
        self.state.borrow_mut().on_pointer_sample(sample)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.borrow().next_deadline()
    }

    pub fn poll(&self, now: Instant) -> Result<SelectorUpdate, SelectorError> {
        self.state.borrow_mut().poll(now)
    }

    pub fn set_color(
        &self,
        color: Hsv,
        from_user: bool,
        should_propagate: bool,
    ) -> Result<SelectorUpdate, SelectorError> {
        self.state.borrow_mut().set_color(color, from_user, should_propagate)
    }

    /// Follow `source`: every color it emits becomes this slider's base
    /// color. At most one binding is active; binding again releases the
    /// previous one first. The slider adopts the source's current color
    /// immediately.
    pub fn bind(&self, source: &Rc<ObservableColor>) -> Result<SelectorUpdate, SelectorError> {
        self.unbind();
        let binding = ColorBinding::install(source.clone(), Rc::downgrade(&self.state));
        self.state.borrow_mut().binding = Some(binding);
        self.set_color(source.color(), true, true)
    }

    /// Stop following the bound source, if any. Dropping the binding
    /// unsubscribes its relay.
    pub fn unbind(&self) {
        let binding = self.state.borrow_mut().binding.take();
        drop(binding);
    }

    pub fn is_bound(&self) -> bool {
        self.state.borrow().binding.is_some()
    }
}

impl std::fmt::Debug for ColorSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.state.borrow().fmt(f)
    }
}
