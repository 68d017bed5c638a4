
/// An HSV color with alpha.
///
/// Hue is expressed in degrees, [0,360); the remaining channels are unit
/// fractions. Every conversion in this module clamps its result, so a value
/// that went through [`Hsv::clamped`] or any of the constructors below never
/// carries an out-of-range component.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    /// Hue (0.0 to 360.0, exclusive)
    pub h: f32,
    /// Saturation (0.0 to 1.0)
    pub s: f32,
    /// Value (0.0 to 1.0)
    pub v: f32,
    /// Alpha (0.0 to 1.0), 1.0 is fully opaque
    pub a: f32,
}

/// Create an opaque [`Hsv`] color, clamped into range.
pub fn hsv(h: f32, s: f32, v: f32) -> Hsv {
    hsva(h, s, v, 1.0)
}

/// Create an [`Hsv`] color with alpha, clamped into range.
pub fn hsva(h: f32, s: f32, v: f32, a: f32) -> Hsv {
    Hsv { h, s, v, a }.clamped()
}

impl Hsv {
    /// Return this color with every component forced into its valid domain.
    ///
    /// Hue is cyclic and wraps (so 360 becomes 0 and -10 becomes 350); the
    /// other channels clamp, infinities included. NaN normalizes to 0.
    pub fn clamped(self) -> Self {
        Self {
            h: wrap_hue(self.h),
            s: unit(self.s),
            v: unit(self.v),
            a: unit(self.a),
        }
    }

    /// Return a copy with the given alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: unit(a), ..self }
    }

    pub fn from_rgba(rgba: Rgba) -> Self {
        let r = rgba.r;
        let g = rgba.g;
        let b = rgba.b;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;

        let s = if max == 0.0 { 0.0 } else { d / max };
        let v = max;

        let mut h = 0.0;
        if max != min {
            if max == r {
                h = (g - b) / d + (if g < b { 6.0 } else { 0.0 });
            } else if max == g {
                h = (b - r) / d + 2.0;
            } else {
                h = (r - g) / d + 4.0;
            }
            h *= 60.0;
        }

        Self { h, s, v, a: rgba.a }.clamped()
    }

    pub fn to_rgba(self) -> Rgba {
        let h = wrap_hue(self.h) / 360.0;
        let c = self.v * self.s;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = self.v - c;

        let (r, g, b) = if h < 1.0 / 6.0 {
            (c, x, 0.0)
        } else if h < 2.0 / 6.0 {
            (x, c, 0.0)
        } else if h < 3.0 / 6.0 {
            (0.0, c, x)
        } else if h < 4.0 / 6.0 {
            (0.0, x, c)
        } else if h < 5.0 / 6.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Rgba {
            r: r + m,
            g: g + m,
            b: b + m,
            a: self.a,
        }
    }
}

/// An RGBA color with unit-fraction channels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Decode a packed ARGB value (alpha in the high byte).
    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xff) as f32 / 255.0,
            r: ((argb >> 16) & 0xff) as f32 / 255.0,
            g: ((argb >> 8) & 0xff) as f32 / 255.0,
            b: (argb & 0xff) as f32 / 255.0,
        }
    }

    /// Encode as a packed ARGB value (alpha in the high byte).
    pub fn to_argb(self) -> u32 {
        let byte = |channel: f32| (unit(channel) * 255.0).round() as u32;
        (byte(self.a) << 24) | (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }
}

impl From<Rgba> for Hsv {
    fn from(rgba: Rgba) -> Self {
        Hsv::from_rgba(rgba)
    }
}

impl From<Hsv> for Rgba {
    fn from(hsv: Hsv) -> Self {
        hsv.to_rgba()
    }
}

fn wrap_hue(h: f32) -> f32 {
    if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 }
}

fn unit(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
