//! 2D immediate-mode drawing surface
//!
//! The reels draw through this trait and never touch pixels themselves. The
//! terminal frontend implements it over a ratatui buffer; [`RecordingSurface`]
//! keeps the calls for inspection.

use serde::Serialize;

/// Horizontal anchor of drawn text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical anchor of drawn text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Drawing context consumed by widgets
///
/// Mirrors a canvas 2D context: state is pushed and popped with
/// `save`/`restore`, `rect` adds to the current path, `stroke` outlines it
/// and `clip` intersects the clip region with it. Colors are CSS-style
/// strings (`"red"`, `"#ff0000"`).
pub trait DrawingSurface {
    fn save(&mut self);
    fn restore(&mut self);

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke(&mut self);
    fn clip(&mut self);

    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn set_font(&mut self, font: &str);
    fn set_shadow(&mut self, color: &str, blur: f64);
    fn set_line_width(&mut self, width: f64);
    fn set_fill_style(&mut self, color: &str);

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: f64);
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum DrawCommand {
    Save,
    Restore,
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Stroke,
    Clip,
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    Font(String),
    Shadow { color: String, blur: f64 },
    LineWidth(f64),
    FillStyle(String),
    StrokeText { text: String, x: f64, y: f64, max_width: f64 },
    FillText { text: String, x: f64, y: f64, max_width: f64 },
}

/// Surface that records every call in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Texts drawn with `fill_text`, in order
    pub fn filled_texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Texts drawn with `stroke_text`, in order
    pub fn stroked_texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::Rect { x, y, w, h });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn clip(&mut self) {
        self.commands.push(DrawCommand::Clip);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(DrawCommand::TextBaseline(baseline));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_string()));
    }

    fn set_shadow(&mut self, color: &str, blur: f64) {
        self.commands.push(DrawCommand::Shadow {
            color: color.to_string(),
            blur,
        });
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::FillStyle(color.to_string()));
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: f64) {
        self.commands.push(DrawCommand::StrokeText {
            text: text.to_string(),
            x,
            y,
            max_width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            max_width,
        });
    }
}
