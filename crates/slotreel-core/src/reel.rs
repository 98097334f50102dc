//! Slot reel widget
//!
//! A reel is a drum of values seen through a rectangular window. Rotation is
//! tracked in degrees; each value owns an equal slice of the circle. The
//! angle selects the current value and, within that slice, how far the
//! labels have scrolled down, so a fractional turn renders as a drum caught
//! mid-rotation rather than a jump between values.

use crate::error::{Error, Result};
use crate::surface::{DrawingSurface, TextAlign, TextBaseline};

/// A value painted on a reel
pub type Symbol = u32;

/// Vertical nudge of the label below the window's center, as a share of its height
const LABEL_BASELINE_SHIFT: f64 = 0.075;

/// Colors and stroke settings of reel labels
#[derive(Debug, Clone, PartialEq)]
pub struct ReelStyle {
    /// Outline and glow color
    pub glow: String,
    /// Fill color of settled labels
    pub fill: String,
    /// Glow radius while spinning
    pub glow_blur: f64,
    pub line_width: f64,
}

impl Default for ReelStyle {
    fn default() -> Self {
        Self {
            glow: "red".to_string(),
            fill: "red".to_string(),
            glow_blur: 15.0,
            line_width: 5.0,
        }
    }
}

/// Partial update of a reel's geometry
///
/// Fields left `None` keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReelSettings {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl ReelSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, w: f64, h: f64) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reel {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    stopped: bool,
    values: Vec<Symbol>,
    index: usize,
    /// Rotation in degrees, [0, 360)
    angle: f64,
    /// Downward scroll of the labels in pixels, [0, h]
    offset: f64,
    style: ReelStyle,
}

impl Reel {
    /// Create a settled reel showing its first value
    pub fn new(values: Vec<Symbol>, settings: ReelSettings) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyReel);
        }

        let mut reel = Self {
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            stopped: true,
            values,
            index: 0,
            angle: 0.0,
            offset: 0.0,
            style: ReelStyle::default(),
        };
        reel.setting(settings);
        Ok(reel)
    }

    pub fn with_style(mut self, style: ReelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn values(&self) -> &[Symbol] {
        &self.values
    }

    pub fn current_value(&self) -> Symbol {
        self.values[self.index]
    }

    /// Value following the current one, wrapping to the first
    pub fn next_value(&self) -> Symbol {
        self.values[(self.index + 1) % self.values.len()]
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn set_stopped(&mut self, stopped: bool) -> &mut Self {
        self.stopped = stopped;
        self
    }

    /// Degrees of rotation covered by one value
    #[inline]
    fn value_span(&self) -> f64 {
        360.0 / self.values.len() as f64
    }

    /// Rotate to `units` values past the first one
    ///
    /// The position is absolute, not added to the previous turn. Fractions
    /// leave the drum between two values. Negative or non-finite input is
    /// ignored.
    pub fn turn(&mut self, units: f64) -> &mut Self {
        if !units.is_finite() || units < 0.0 {
            return self;
        }

        let span = self.value_span();
        // Whole revolutions are dropped before scaling so huge turns stay finite
        let mut angle = (units % self.values.len() as f64) * span;
        if angle >= 360.0 {
            angle %= 360.0;
        }

        let index = ((angle / span) as usize).min(self.values.len() - 1);
        let offset = self.h / span * angle - self.h * index as f64;

        self.angle = angle;
        self.index = index;
        self.offset = offset.clamp(0.0, self.h.max(0.0));
        self
    }

    /// Apply a geometry update, keeping rotation state
    pub fn setting(&mut self, settings: ReelSettings) -> &mut Self {
        let ReelSettings { x, y, w, h } = settings;
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(y) = y {
            self.y = y;
        }
        if let Some(w) = w {
            self.w = w;
        }
        if let Some(h) = h {
            self.h = h;
            // Keep the scroll proportional to the new row height
            self.turn(self.angle / self.value_span());
        }
        self
    }

    /// Outline the window and paint the visible labels inside it
    pub fn draw(&self, surface: &mut dyn DrawingSurface) -> &Self {
        surface.save();
        surface.rect(self.x, self.y, self.w, self.h);
        surface.stroke();

        surface.clip();
        self.draw_values(surface);
        surface.restore();

        self
    }

    fn draw_values(&self, surface: &mut dyn DrawingSurface) {
        let x = self.x + self.w / 2.0;
        let y = self.y + self.h / 2.0 + self.h * LABEL_BASELINE_SHIFT + self.offset;

        self.show_text(surface, &self.current_value().to_string(), x, y);
        // The next value sits one row above, scrolling in from the top
        self.show_text(surface, &self.next_value().to_string(), x, y - self.h);
    }

    fn show_text(&self, surface: &mut dyn DrawingSurface, text: &str, x: f64, y: f64) {
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.set_font(&format!("bold {}px monospace", self.h));
        surface.set_shadow(&self.style.glow, self.style.glow_blur);
        surface.set_line_width(self.style.line_width);

        surface.stroke_text(text, x, y, self.w);

        // A spinning reel shows outlines only
        if self.stopped {
            surface.set_shadow(&self.style.glow, 0.0);
            surface.set_fill_style(&self.style.fill);
            surface.fill_text(text, x, y, self.w);
        }
    }
}
