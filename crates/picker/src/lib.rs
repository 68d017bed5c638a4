//! Interactive color-selection primitives.
//!
//! The crate models the state behind a color picker without touching a
//! screen: a polar hue/saturation wheel, linear channel sliders, and the
//! propagation plumbing between them. The host owns rendering, layout, and
//! timers; it feeds geometry and timestamped pointer samples in and paints
//! from the state it reads back.
//!
//! Everything is single-threaded. Components share state through `Rc` and
//! interior mutability, never locks.
//!
//! ```no_run
//! use color_picker::{ColorPicker, PointerSample, SliderTrack, WheelGeometry};
//! use instant::Instant;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut picker = ColorPicker::new()?;
//! picker.wheel_mut().set_geometry(WheelGeometry::new((100.0, 100.0), 100.0)?)?;
//! picker.brightness().set_track(SliderTrack::new(10.0, 110.0)?)?;
//! picker.alpha().set_track(SliderTrack::new(10.0, 110.0)?)?;
//!
//! picker
//!     .wheel_mut()
//!     .on_pointer_sample(PointerSample::start((200.0, 100.0), Instant::now()))?;
//! let color = picker.color();
//! # Ok(())
//! # }
//! ```

mod binding;
mod color;
mod event;
mod geometry;
mod observable;
mod picker;
mod slider;
mod throttle;
mod wheel;

pub use binding::ColorBinding;
pub use color::{Hsv, Rgba, hsv, hsva};
pub use event::{PointerSample, SamplePhase, SelectorError, SelectorUpdate};
pub use geometry::{
    GeometryError, SliderTrack, WheelGeometry, clamp_to_disk, hue_saturation_at, polar_offset_for,
};
pub use observable::{
    ColorEvent, ColorObserver, NotifyError, ObservableColor, ObserverError, ObserverFailure,
};
pub use picker::ColorPicker;
pub use slider::{
    AlphaChannel, BrightnessChannel, ColorSlider, ColorSliderState, DEFAULT_SLIDER_COLOR,
    SliderChannel,
};
pub use throttle::{Admission, DEFAULT_MIN_INTERVAL, EventThrottle};
pub use wheel::{ColorWheelState, DEFAULT_WHEEL_COLOR};
