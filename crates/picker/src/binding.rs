//! One-directional color bindings.
//!
//! A binding makes a slider follow an upstream [`ObservableColor`]: the
//! slider owns the binding, the source only sees an anonymous observer.
//! Dropping or rebinding the slider releases the subscription, so a source
//! never keeps a dead component alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::observable::{ColorEvent, ColorObserver, ObservableColor, ObserverError};
use crate::slider::ColorSliderState;

pub struct ColorBinding {
    source: Rc<ObservableColor>,
    relay: Rc<dyn ColorObserver>,
}

impl ColorBinding {
    pub(crate) fn install(
        source: Rc<ObservableColor>,
        target: Weak<RefCell<ColorSliderState>>,
    ) -> Self {
        let relay: Rc<dyn ColorObserver> = Rc::new(BindingRelay { target });
        source.subscribe(relay.clone());
        Self { source, relay }
    }
}

impl Drop for ColorBinding {
    fn drop(&mut self) {
        self.source.unsubscribe(&self.relay);
    }
}

impl std::fmt::Debug for ColorBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorBinding")
            .field("source", &self.source)
            .finish()
    }
}

struct BindingRelay {
    target: Weak<RefCell<ColorSliderState>>,
}

impl ColorObserver for BindingRelay {
    fn on_color(&self, event: ColorEvent) -> Result<(), ObserverError> {
        let Some(target) = self.target.upgrade() else {
            // The slider is gone; the stale subscription is harmless and
            // disappears with the source.
            return Ok(());
        };

        // A borrow failure means this event was caused by the slider itself
        // further down its own call stack; relaying it back would only echo.
        let Ok(mut state) = target.try_borrow_mut() else {
            log::debug!("skipping relayed color event during reentrant update");
            return Ok(());
        };

        state.set_color(event.color, event.from_user, event.should_propagate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::color::hsv;
    use crate::event::PointerSample;
    use crate::geometry::SliderTrack;
    use crate::slider::ColorSlider;
    use crate::wheel::ColorWheelState;
    use crate::geometry::WheelGeometry;
    use instant::Instant;
    use std::rc::Rc;

    fn bound_pair() -> (ColorWheelState, ColorSlider) {
        let mut wheel = ColorWheelState::new();
        wheel
            .set_geometry(WheelGeometry::new((100.0, 100.0), 100.0).unwrap())
            .unwrap();
        let slider = ColorSlider::brightness();
        slider.set_track(SliderTrack::new(0.0, 100.0).unwrap()).unwrap();
        slider.bind(wheel.observable()).unwrap();
        (wheel, slider)
    }

    #[test]
    fn test_bind_adopts_the_source_color_immediately() {
        let (wheel, slider) = bound_pair();
        assert!(slider.is_bound());

        // The slider starts at full value, so the adopted color keeps it.
        let color = slider.color();
        assert_eq!(color.h, wheel.color().h);
        assert_eq!(color.v, 1.0);
    }

    #[test]
    fn test_source_changes_flow_to_the_bound_slider() {
        let (mut wheel, slider) = bound_pair();
        slider
            .on_pointer_sample(PointerSample::start((50.0, 0.0), Instant::now()))
            .unwrap();
        assert!((slider.value() - 0.5).abs() < 1e-6);

        // Press hue 0 on the rim; the slider re-hues but keeps half value.
        wheel
            .on_pointer_sample(PointerSample::start((200.0, 100.0), Instant::now()))
            .unwrap();

        let color = slider.color();
        assert!(color.h < 1e-3 || color.h > 360.0 - 1e-3);
        assert!((color.v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_slider_changes_do_not_flow_back_to_the_source() {
        let (wheel, slider) = bound_pair();
        let before = wheel.color();

        slider
            .on_pointer_sample(PointerSample::start((25.0, 0.0), Instant::now()))
            .unwrap();

        assert_eq!(wheel.color(), before);
    }

    #[test]
    fn test_rebinding_releases_the_previous_source() {
        let (mut wheel, slider) = bound_pair();
        let other = Rc::new(crate::observable::ObservableColor::new(hsv(40.0, 1.0, 1.0)));

        slider.bind(&other).unwrap();
        assert_eq!(wheel.observable().observer_count(), 0);
        assert!((slider.color().h - 40.0).abs() < 1e-3);

        // The old source no longer reaches the slider.
        wheel
            .on_pointer_sample(PointerSample::start((0.0, 100.0), Instant::now()))
            .unwrap();
        assert!((slider.color().h - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_unbind_stops_the_flow() {
        let (mut wheel, slider) = bound_pair();
        slider.unbind();
        assert!(!slider.is_bound());
        assert_eq!(wheel.observable().observer_count(), 0);

        let before = slider.color();
        wheel
            .on_pointer_sample(PointerSample::start((100.0, 200.0), Instant::now()))
            .unwrap();
        assert_eq!(slider.color(), before);
    }

    #[test]
    fn test_dropped_slider_leaves_a_harmless_subscription() {
        let mut wheel = ColorWheelState::new();
        wheel
            .set_geometry(WheelGeometry::new((100.0, 100.0), 100.0).unwrap())
            .unwrap();
        {
            let slider = ColorSlider::brightness();
            slider.bind(wheel.observable()).unwrap();
        }

        // The relay target is gone; notifying must still succeed.
        let update = wheel
            .on_pointer_sample(PointerSample::start((200.0, 100.0), Instant::now()))
            .unwrap();
        assert!(update.notified);
    }
}
