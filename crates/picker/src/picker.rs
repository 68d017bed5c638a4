//! The assembled three-stage picker.

use std::rc::Rc;

use crate::color::Hsv;
use crate::event::SelectorError;
use crate::observable::ObservableColor;
use crate::slider::ColorSlider;
use crate::wheel::ColorWheelState;

/// A hue/saturation wheel chained into a brightness slider and an alpha
/// slider.
///
/// Each stage follows the previous one, so the alpha slider's observable
/// carries the fully resolved color. The host still drives each stage's
/// layout and pointer input individually.
pub struct ColorPicker {
    wheel: ColorWheelState,
    brightness: ColorSlider,
    alpha: ColorSlider,
}

impl ColorPicker {
    pub fn new() -> Result<Self, SelectorError> {
        let wheel = ColorWheelState::new();
        let brightness = ColorSlider::brightness();
        let alpha = ColorSlider::alpha();

        brightness.bind(wheel.observable())?;
        alpha.bind(&brightness.observable())?;

        Ok(Self {
            wheel,
            brightness,
            alpha,
        })
    }

    /// The end of the chain; subscribe here for the final color.
    pub fn observable(&self) -> Rc<ObservableColor> {
        self.alpha.observable()
    }

    pub fn color(&self) -> Hsv {
        self.alpha.color()
    }

    pub fn wheel(&self) -> &ColorWheelState {
        &self.wheel
    }

    pub fn wheel_mut(&mut self) -> &mut ColorWheelState {
        &mut self.wheel
    }

    pub fn brightness(&self) -> &ColorSlider {
        &self.brightness
    }

    pub fn alpha(&self) -> &ColorSlider {
        &self.alpha
    }

    /// Seed the whole chain with a color, as if it had been picked.
    ///
    /// The wheel takes the hue and saturation and the change rides the
    /// bindings down, so each slider adopts its own channel.
    pub fn set_initial_color(&mut self, color: Hsv) -> Result<(), SelectorError> {
        self.wheel.set_color(color.clamped(), false, true)?;
        Ok(())
    }

    pub fn set_emit_on_release_only(&mut self, only: bool) {
        self.wheel.set_emit_on_release_only(only);
        self.brightness.set_emit_on_release_only(only);
        self.alpha.set_emit_on_release_only(only);
    }
}
