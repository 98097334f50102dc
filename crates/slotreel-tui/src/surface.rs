//! Canvas-style drawing onto a ratatui buffer
//!
//! One surface unit is one terminal cell, measured from the origin of the
//! area handed to [`TerminalSurface::new`]. Strokes become box-drawing
//! borders and text is placed on the cell containing its anchor. Fonts of at
//! least five cells draw digits as block glyphs.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::line;
use slotreel_core::surface::{TextAlign, TextBaseline};
use slotreel_core::DrawingSurface;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{parse_color, Theme};

const GLYPH_ROWS: i32 = 5;
const GLYPH_COLS: i32 = 3;

#[rustfmt::skip]
const DIGIT_GLYPHS: [[&str; GLYPH_ROWS as usize]; 10] = [
    ["###", "# #", "# #", "# #", "###"],
    [" # ", "## ", " # ", " # ", "###"],
    ["###", "  #", "###", "#  ", "###"],
    ["###", "  #", "###", "  #", "###"],
    ["# #", "# #", "###", "  #", "  #"],
    ["###", "#  ", "###", "  #", "###"],
    ["###", "#  ", "###", "# #", "###"],
    ["###", "  #", "  #", "  #", "  #"],
    ["###", "# #", "###", "# #", "###"],
    ["###", "# #", "###", "  #", "###"],
];

const STROKE_GLYPH: &str = "▒";
const FILL_GLYPH: &str = "█";

/// Half-open rectangle of absolute cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl CellRect {
    fn from_area(area: Rect) -> Self {
        Self {
            left: i32::from(area.x),
            top: i32::from(area.y),
            right: i32::from(area.x) + i32::from(area.width),
            bottom: i32::from(area.y) + i32::from(area.height),
        }
    }

    fn intersect(self, other: CellRect) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    fn union(self, other: CellRect) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Cells inside the border
    fn inner(self) -> Self {
        Self {
            left: self.left + 1,
            top: self.top + 1,
            right: self.right - 1,
            bottom: self.bottom - 1,
        }
    }

    fn contains(self, col: i32, row: i32) -> bool {
        col >= self.left && col < self.right && row >= self.top && row < self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Stroke,
    Fill,
}

#[derive(Debug, Clone)]
struct SurfaceState {
    clip: CellRect,
    align: TextAlign,
    baseline: TextBaseline,
    font_size: f64,
    bold: bool,
    /// Glow color, only while the blur is positive
    shadow: Option<Color>,
    line_width: f64,
    fill: Color,
}

/// [`DrawingSurface`] over a terminal buffer
pub struct TerminalSurface<'a> {
    buf: &'a mut Buffer,
    origin: (i32, i32),
    outline: Color,
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    path: Vec<CellRect>,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, theme: &Theme) -> Self {
        let clip = CellRect::from_area(area).intersect(CellRect::from_area(buf.area));
        Self {
            buf,
            origin: (i32::from(area.x), i32::from(area.y)),
            outline: theme.outline,
            state: SurfaceState {
                clip,
                align: TextAlign::default(),
                baseline: TextBaseline::default(),
                font_size: 1.0,
                bold: false,
                shadow: None,
                line_width: 1.0,
                fill: theme.fg0,
            },
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    fn col(&self, x: f64) -> i32 {
        self.origin.0 + x.floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        self.origin.1 + y.floor() as i32
    }

    fn put(&mut self, col: i32, row: i32, symbol: &str, style: Style) {
        if !self.state.clip.contains(col, row) {
            return;
        }
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((col, row)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }

    fn draw_border(&mut self, rect: CellRect, set: line::Set, style: Style) {
        if rect.right - rect.left < 2 || rect.bottom - rect.top < 2 {
            return;
        }
        let (right, bottom) = (rect.right - 1, rect.bottom - 1);
        for col in rect.left + 1..right {
            self.put(col, rect.top, set.horizontal, style);
            self.put(col, bottom, set.horizontal, style);
        }
        for row in rect.top + 1..bottom {
            self.put(rect.left, row, set.vertical, style);
            self.put(right, row, set.vertical, style);
        }
        self.put(rect.left, rect.top, set.top_left, style);
        self.put(right, rect.top, set.top_right, style);
        self.put(rect.left, bottom, set.bottom_left, style);
        self.put(right, bottom, set.bottom_right, style);
    }

    fn paint_style(&self, paint: Paint) -> Style {
        match paint {
            Paint::Stroke => {
                let style = Style::default().fg(self.state.shadow.unwrap_or(self.outline));
                if self.state.shadow.is_some() {
                    style
                } else {
                    style.add_modifier(Modifier::DIM)
                }
            }
            Paint::Fill => {
                let style = Style::default().fg(self.state.fill);
                if self.state.bold {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                }
            }
        }
    }

    /// Top-left cell of a `width` by `height` block anchored at (x, y)
    fn anchor(&self, x: f64, y: f64, width: i32, height: i32) -> (i32, i32) {
        let (w, h) = (f64::from(width), f64::from(height));
        let left = match self.state.align {
            TextAlign::Start => self.col(x),
            TextAlign::Center => self.col(x - w / 2.0 + 0.5),
            TextAlign::End => self.col(x) - width + 1,
        };
        let top = match self.state.baseline {
            TextBaseline::Top => self.row(y),
            TextBaseline::Middle => self.row(y - h / 2.0 + 0.5),
            TextBaseline::Alphabetic | TextBaseline::Bottom => self.row(y) - height + 1,
        };
        (left, top)
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, max_width: f64, paint: Paint) {
        let max_cols = if max_width.is_finite() && max_width > 0.0 {
            max_width.floor() as usize
        } else {
            return;
        };

        let digits: Option<Vec<usize>> = text
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as usize))
            .collect();
        if let Some(digits) = digits.filter(|d| !d.is_empty()) {
            let n = digits.len() as i32;
            let width = n * GLYPH_COLS + (n - 1);
            if self.state.font_size >= f64::from(GLYPH_ROWS) && width as usize <= max_cols {
                self.draw_glyphs(&digits, x, y, width, paint);
                return;
            }
        }

        let mut shown = String::new();
        let mut width = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if width + w > max_cols {
                break;
            }
            width += w;
            shown.push(c);
        }
        if shown.is_empty() {
            return;
        }

        let style = self.paint_style(paint);
        let (mut col, row) = self.anchor(x, y, UnicodeWidthStr::width(shown.as_str()) as i32, 1);
        let mut symbol = [0u8; 4];
        for c in shown.chars() {
            self.put(col, row, c.encode_utf8(&mut symbol), style);
            col += c.width().unwrap_or(0) as i32;
        }
    }

    fn draw_glyphs(&mut self, digits: &[usize], x: f64, y: f64, width: i32, paint: Paint) {
        let style = self.paint_style(paint);
        let symbol = match paint {
            Paint::Stroke => STROKE_GLYPH,
            Paint::Fill => FILL_GLYPH,
        };
        let (left, top) = self.anchor(x, y, width, GLYPH_ROWS);

        for (i, &digit) in digits.iter().enumerate() {
            let glyph_left = left + i as i32 * (GLYPH_COLS + 1);
            for (dy, line) in DIGIT_GLYPHS[digit].iter().enumerate() {
                for (dx, mark) in line.chars().enumerate() {
                    if mark == '#' {
                        self.put(glyph_left + dx as i32, top + dy as i32, symbol, style);
                    }
                }
            }
        }
    }
}

impl DrawingSurface for TerminalSurface<'_> {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let left = self.origin.0 + x.round() as i32;
        let top = self.origin.1 + y.round() as i32;
        self.path.push(CellRect {
            left,
            top,
            right: self.origin.0 + (x + w).round() as i32,
            bottom: self.origin.1 + (y + h).round() as i32,
        });
    }

    fn stroke(&mut self) {
        let set = if self.state.line_width >= 3.0 {
            line::THICK
        } else {
            line::NORMAL
        };
        let style = Style::default().fg(self.outline);
        for rect in self.path.clone() {
            self.draw_border(rect, set, style);
        }
    }

    /// Clips to the inside of the path's border and starts a new path
    fn clip(&mut self) {
        let Some(bounds) = self.path.iter().copied().reduce(CellRect::union) else {
            return;
        };
        self.state.clip = self.state.clip.intersect(bounds.inner());
        self.path.clear();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn set_font(&mut self, font: &str) {
        let mut bold = false;
        let mut size = None;
        for token in font.split_whitespace() {
            if token.eq_ignore_ascii_case("bold") {
                bold = true;
            } else if let Some(px) = token.strip_suffix("px") {
                size = px.parse::<f64>().ok().filter(|s| s.is_finite());
            }
        }
        self.state.bold = bold;
        if let Some(size) = size {
            self.state.font_size = size;
        }
    }

    fn set_shadow(&mut self, color: &str, blur: f64) {
        self.state.shadow = if blur > 0.0 { parse_color(color) } else { None };
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_fill_style(&mut self, color: &str) {
        // Unparseable colors leave the fill unchanged
        if let Some(color) = parse_color(color) {
            self.state.fill = color;
        }
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: f64) {
        self.draw_text(text, x, y, max_width, Paint::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: f64) {
        self.draw_text(text, x, y, max_width, Paint::Fill);
    }
}

#[cfg(test)]
mod tests {
    use slotreel_core::{Reel, ReelSettings};

    use super::*;

    fn buffer(width: u16, height: u16) -> Buffer {
        Buffer::empty(Rect::new(0, 0, width, height))
    }

    fn row_text(buf: &Buffer, row: u16) -> String {
        (0..buf.area.width).map(|col| buf[(col, row)].symbol()).collect()
    }

    #[test]
    fn test_stroke_draws_box() {
        let mut buf = buffer(10, 5);
        let theme = Theme::default();
        let area = buf.area;
        let mut surface = TerminalSurface::new(&mut buf, area, &theme);
        surface.rect(1.0, 1.0, 4.0, 3.0);
        surface.stroke();
        drop(surface);

        assert_eq!(row_text(&buf, 1), " ┌──┐     ");
        assert_eq!(row_text(&buf, 2), " │  │     ");
        assert_eq!(row_text(&buf, 3), " └──┘     ");
        assert_eq!(buf[(1, 1)].fg, theme.outline);
    }

    #[test]
    fn test_clip_restricts_text_until_restore() {
        let mut buf = buffer(12, 3);
        let theme = Theme::default();
        let area = buf.area;
        let mut surface = TerminalSurface::new(&mut buf, area, &theme);

        surface.save();
        surface.rect(0.0, 0.0, 5.0, 3.0);
        surface.clip();
        surface.set_text_baseline(TextBaseline::Top);
        surface.fill_text("abcdefgh", 0.0, 1.0, 20.0);
        surface.restore();

        surface.set_text_baseline(TextBaseline::Top);
        surface.fill_text("xy", 8.0, 1.0, 20.0);
        drop(surface);

        // Only the three cells inside the border survive the clip
        assert_eq!(row_text(&buf, 1), " bcd    xy  ");
    }

    #[test]
    fn test_text_alignment_and_truncation() {
        let mut buf = buffer(9, 1);
        let theme = Theme::default();
        let area = buf.area;
        let mut surface = TerminalSurface::new(&mut buf, area, &theme);
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.fill_text("abc", 4.5, 0.5, 9.0);
        surface.set_text_align(TextAlign::End);
        surface.fill_text("123", 8.0, 0.5, 2.0);
        drop(surface);

        assert_eq!(row_text(&buf, 0), "   abc 12");
    }

    #[test]
    fn test_area_origin_offsets_drawing() {
        let mut buf = buffer(6, 4);
        let theme = Theme::default();
        let area = Rect::new(2, 1, 4, 3);
        let mut surface = TerminalSurface::new(&mut buf, area, &theme);
        surface.set_text_baseline(TextBaseline::Top);
        surface.fill_text("zzzzzz", 0.0, 0.0, 10.0);
        drop(surface);

        assert_eq!(row_text(&buf, 0), "      ");
        assert_eq!(row_text(&buf, 1), "  zzzz");
    }

    #[test]
    fn test_fill_uses_style_and_bold() {
        let mut buf = buffer(3, 1);
        let theme = Theme::default();
        let area = buf.area;
        let mut surface = TerminalSurface::new(&mut buf, area, &theme);
        surface.set_text_baseline(TextBaseline::Top);
        surface.set_font("bold 1px monospace");
        surface.set_fill_style("#00ff00");
        surface.fill_text("a", 0.0, 0.0, 3.0);
        surface.set_fill_style("nonsense");
        surface.fill_text("b", 1.0, 0.0, 3.0);
        drop(surface);

        for col in 0..2 {
            assert_eq!(buf[(col, 0)].fg, Color::Rgb(0, 255, 0));
            assert!(buf[(col, 0)].modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_stroke_text_uses_glow() {
        let mut buf = buffer(3, 1);
        let theme = Theme::default();
        let area = buf.area;
        let mut surface = TerminalSurface::new(&mut buf, area, &theme);
        surface.set_text_baseline(TextBaseline::Top);
        surface.set_shadow("red", 15.0);
        surface.stroke_text("a", 0.0, 0.0, 3.0);
        surface.set_shadow("red", 0.0);
        surface.stroke_text("b", 1.0, 0.0, 3.0);
        drop(surface);

        assert_eq!(buf[(0, 0)].fg, Color::Red);
        assert_eq!(buf[(1, 0)].fg, theme.outline);
    }

    #[test]
    fn test_tall_font_draws_block_digits() {
        let mut buf = buffer(5, 7);
        let theme = Theme::default();
        let area = buf.area;
        let mut surface = TerminalSurface::new(&mut buf, area, &theme);
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.set_font("bold 7px monospace");
        surface.fill_text("7", 2.5, 3.5, 5.0);
        drop(surface);

        assert_eq!(row_text(&buf, 1), " ███ ");
        assert_eq!(row_text(&buf, 2), "   █ ");
        assert_eq!(row_text(&buf, 5), "   █ ");
        assert_eq!(row_text(&buf, 0), "     ");
        assert_eq!(row_text(&buf, 6), "     ");
    }

    #[test]
    fn test_stopped_reel_renders_inside_border() {
        let mut buf = buffer(12, 9);
        let theme = Theme::default();
        let reel = Reel::new((0..8).collect(), ReelSettings::new().position(1.0, 1.0).size(10.0, 7.0))
            .unwrap();

        let area = buf.area;
        let mut surface = TerminalSurface::new(&mut buf, area, &theme);
        reel.draw(&mut surface);
        drop(surface);

        assert_eq!(buf[(1, 1)].symbol(), "┌");
        assert_eq!(buf[(10, 7)].symbol(), "┘");
        // The current value is filled, the next one is clipped away above
        let filled = (0..9u16)
            .flat_map(|row| (0..12u16).map(move |col| (col, row)))
            .filter(|&pos| buf[pos].symbol() == FILL_GLYPH)
            .count();
        assert!(filled > 0);
        for col in 0..12 {
            assert_ne!(buf[(col, 0)].symbol(), FILL_GLYPH);
            assert_ne!(buf[(col, 8)].symbol(), FILL_GLYPH);
        }
    }
}
