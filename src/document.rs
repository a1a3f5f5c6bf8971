// src/document.rs
//! Paginated drawing surface with a text cursor.
//!
//! The context records every drawing call into a per-page display list of
//! [`DrawOp`]s. Nothing here knows about PDF objects; [`crate::pdf_writer`]
//! serializes the finished pages. Coordinates are millimetres measured from
//! the top-left corner of the page.

use crate::fonts::{FontStyle, TextMeasure};

/// Millimetres per typographic point
pub const PT_TO_MM: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub left_margin: f32,
    pub top_margin: f32,
    pub right_margin: f32,
    /// Horizontal padding between a cell border and its text
    pub cell_margin: f32,
    pub line_width: f32,
}

impl PageGeometry {
    /// A4 portrait with 1 cm margins
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        left_margin: 10.0,
        top_margin: 10.0,
        right_margin: 10.0,
        cell_margin: 1.0,
        line_width: 0.2,
    };
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
    /// Left aligned, with wrapped lines stretched to the full width
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellWidth {
    /// From the current x position to the right margin
    Fill,
    Fixed(f32),
}

/// Where the cursor goes after a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Right,
    NextLine,
    Below,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        text: String,
        style: FontStyle,
        size_pt: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Line { .. } => None,
            })
            .collect()
    }
}

pub struct DocumentContext<'m> {
    measure: &'m dyn TextMeasure,
    geometry: PageGeometry,
    pages: Vec<Page>,
    x: f32,
    y: f32,
    style: FontStyle,
    size_pt: f32,
    auto_page_break: bool,
    break_margin: f32,
    last_height: f32,
}

impl<'m> DocumentContext<'m> {
    pub fn new(measure: &'m dyn TextMeasure, geometry: PageGeometry) -> Self {
        Self {
            measure,
            geometry,
            pages: Vec::new(),
            x: geometry.left_margin,
            y: geometry.top_margin,
            style: FontStyle::Regular,
            size_pt: 12.0,
            auto_page_break: true,
            break_margin: 20.0,
            last_height: 0.0,
        }
    }

    pub fn set_auto_page_break(&mut self, enabled: bool, margin: f32) {
        self.auto_page_break = enabled;
        self.break_margin = margin;
    }

    pub fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.style = style;
        self.size_pt = size_pt;
    }

    pub fn font(&self) -> (FontStyle, f32) {
        (self.style, self.size_pt)
    }

    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.x = self.geometry.left_margin;
        self.y = self.geometry.top_margin;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Width of `text` in the active font, in mm
    pub fn string_width(&self, text: &str) -> f32 {
        self.measure.text_advance(self.style, text) * self.font_size_mm() / 1000.0
    }

    /// Single-line text cell at the cursor
    pub fn cell(&mut self, width: CellWidth, height: f32, text: &str, align: Align, advance: Advance) {
        self.place_line(width, height, text, align, 0.0, advance);
    }

    /// Wrapped text block. Each line becomes a cell of `height` placed below
    /// the previous one; the cursor ends at the left margin under the block.
    pub fn multi_cell(&mut self, width: CellWidth, height: f32, text: &str, align: Align) {
        self.ensure_page();

        let w = self.resolve_width(width);
        let max_width = w - 2.0 * self.geometry.cell_margin;
        let chars: Vec<char> = text.replace('\r', "").chars().collect();
        let widths = self.char_widths(&chars);

        let mut end = chars.len();
        if end > 0 && chars[end - 1] == '\n' {
            end -= 1;
        }

        let mut sep: Option<usize> = None;
        let mut i = 0;
        let mut start = 0;
        let mut line_width = 0.0;
        let mut width_to_sep = 0.0;
        let mut spaces = 0usize;

        while i < end {
            let c = chars[i];
            if c == '\n' {
                self.wrapped_line(w, height, &chars[start..i], align, 0.0);
                i += 1;
                sep = None;
                start = i;
                line_width = 0.0;
                spaces = 0;
                continue;
            }
            if c == ' ' {
                sep = Some(i);
                width_to_sep = line_width;
                spaces += 1;
            }
            line_width += widths[i];

            if line_width > max_width {
                match sep {
                    None => {
                        // A line always takes at least one character
                        if i == start {
                            i += 1;
                        }
                        self.wrapped_line(w, height, &chars[start..i], align, 0.0);
                    }
                    Some(sep_index) => {
                        let word_spacing = if align == Align::Justify && spaces > 1 {
                            (max_width - width_to_sep) / (spaces - 1) as f32
                        } else {
                            0.0
                        };
                        self.wrapped_line(w, height, &chars[start..sep_index], align, word_spacing);
                        i = sep_index + 1;
                    }
                }
                sep = None;
                start = i;
                line_width = 0.0;
                spaces = 0;
            } else {
                i += 1;
            }
        }

        self.wrapped_line(w, height, &chars[start..i], align, 0.0);
        self.x = self.geometry.left_margin;
    }

    /// Line break: back to the left margin and down by `height`, or by the
    /// height of the last cell when `None`
    pub fn ln(&mut self, height: Option<f32>) {
        self.x = self.geometry.left_margin;
        self.y += height.unwrap_or(self.last_height);
    }

    /// Rule across the content width at the current y, followed by a 2 mm gap
    pub fn horizontal_rule(&mut self) {
        self.ensure_page();

        let left = self.geometry.left_margin;
        let right = left + (self.geometry.width - 2.0 * left);
        let y = self.y;
        let width = self.geometry.line_width;
        self.push(DrawOp::Line {
            from: (left, y),
            to: (right, y),
            width,
        });
        self.ln(Some(2.0));
    }

    fn font_size_mm(&self) -> f32 {
        self.size_pt * PT_TO_MM
    }

    fn char_widths(&self, chars: &[char]) -> Vec<f32> {
        let text: String = chars.iter().collect();
        let scale = self.font_size_mm() / 1000.0;
        self.measure
            .advances(self.style, &text)
            .into_iter()
            .map(|advance| advance * scale)
            .collect()
    }

    fn resolve_width(&self, width: CellWidth) -> f32 {
        match width {
            CellWidth::Fixed(w) => w,
            CellWidth::Fill => {
                (self.geometry.width - self.geometry.right_margin - self.x).max(0.0)
            }
        }
    }

    fn page_break_trigger(&self) -> f32 {
        self.geometry.height - self.break_margin
    }

    fn ensure_page(&mut self) {
        if self.pages.is_empty() {
            self.add_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        self.ensure_page();
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn push_text(&mut self, x: f32, baseline: f32, text: &str) {
        self.push(DrawOp::Text {
            x,
            baseline,
            text: text.to_string(),
            style: self.style,
            size_pt: self.size_pt,
        });
    }

    fn wrapped_line(&mut self, width: f32, height: f32, chars: &[char], align: Align, word_spacing: f32) {
        let text: String = chars.iter().collect();
        self.place_line(
            CellWidth::Fixed(width),
            height,
            &text,
            align,
            word_spacing,
            Advance::Below,
        );
    }

    fn place_line(
        &mut self,
        width: CellWidth,
        height: f32,
        text: &str,
        align: Align,
        word_spacing: f32,
        advance: Advance,
    ) {
        self.ensure_page();

        if self.auto_page_break && self.y + height > self.page_break_trigger() {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let w = self.resolve_width(width);
        let margin = self.geometry.cell_margin;

        if !text.is_empty() {
            let baseline = self.y + 0.5 * height + 0.3 * self.font_size_mm();

            if word_spacing > 0.0 {
                let space = self.string_width(" ") + word_spacing;
                let mut cursor = self.x + margin;
                for (index, word) in text.split(' ').enumerate() {
                    if index > 0 {
                        cursor += space;
                    }
                    if !word.is_empty() {
                        self.push_text(cursor, baseline, word);
                        cursor += self.string_width(word);
                    }
                }
            } else {
                let text_width = self.string_width(text);
                let dx = match align {
                    Align::Right => w - margin - text_width,
                    Align::Center => (w - text_width) / 2.0,
                    Align::Left | Align::Justify => margin,
                };
                self.push_text(self.x + dx, baseline, text);
            }
        }

        self.last_height = height;
        match advance {
            Advance::Right => self.x += w,
            Advance::NextLine => {
                self.y += height;
                self.x = self.geometry.left_margin;
            }
            Advance::Below => self.y += height,
        }
    }
}
