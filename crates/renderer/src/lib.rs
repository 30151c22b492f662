//! Stacked bar chart drawing for `cpustat`.
//!
//! [`ChartConfig`] holds everything that stays fixed for the process
//! lifetime (title, palette, bar width); [`StackedBarChart`] paints one frame
//! of history into a ratatui buffer, one bar per sample, oldest on the left.

use cpustat_theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Widget},
};

/// Turns a segment value into the text printed inside it.
pub type LabelFormatter = fn(f64) -> String;

/// Empty below 0.6 to keep slivers unlabeled, otherwise `value + 0.4`
/// truncated to an integer.
pub fn format_label(value: f64) -> String {
    if value < 0.6 {
        return String::new();
    }
    format!("{}", (value + 0.4) as u64)
}

/// Static chart settings.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title:     String,
    /// One color per category, bottom segment first.
    pub colors:    Vec<Color>,
    /// Bar width in columns; bars are separated by one blank column.
    pub bar_width: u16,
    /// Value that fills the full chart height.
    pub max:       f64,
    pub border:    bool,
    pub formatter: LabelFormatter,
}

impl ChartConfig {
    pub fn from_theme(theme: &Theme, bar_width: u16) -> Self {
        Self {
            title:     theme.title.clone(),
            colors:    theme.palette.iter().map(|c| c.to_ratatui()).collect(),
            bar_width: bar_width.max(1),
            max:       100.0,
            border:    theme.border,
            formatter: format_label,
        }
    }

    fn block(&self) -> Block<'_> {
        let block = if self.border {
            Block::bordered()
        } else {
            Block::new()
        };
        block.title(self.title.as_str())
    }

    /// Drawable area left for the bars once the border and title are placed.
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }
}

/// One frame of the chart.
pub struct StackedBarChart<'a> {
    config: &'a ChartConfig,
    bars:   Vec<&'a [f64]>,
    footer: Option<String>,
}

impl<'a> StackedBarChart<'a> {
    pub fn new<I>(config: &'a ChartConfig, bars: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec<f64>>,
    {
        Self {
            config,
            bars: bars.into_iter().map(Vec::as_slice).collect(),
            footer: None,
        }
    }

    /// Right-aligned text on the bottom edge (e.g. time of the last sample).
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    fn render_bar(&self, values: &[f64], x: u16, inner: Rect, buf: &mut Buffer) {
        let height = inner.height as f64;
        let max = if self.config.max > 0.0 { self.config.max } else { 100.0 };

        let mut cumulative = 0.0;
        let mut bottom: u16 = 0;

        for (value, color) in values.iter().zip(&self.config.colors) {
            let value = if value.is_finite() { value.clamp(0.0, max) } else { 0.0 };
            cumulative = (cumulative + value).min(max);
            // Segments are placed on cumulative rounding so they never overlap.
            let top = ((cumulative / max) * height).round() as u16;
            if top <= bottom {
                continue;
            }

            for row in bottom..top {
                let y = inner.bottom() - 1 - row;
                for dx in 0..self.config.bar_width {
                    if let Some(cell) = buf.cell_mut((x + dx, y)) {
                        cell.set_symbol(" ").set_bg(*color);
                    }
                }
            }

            let label = (self.config.formatter)(value);
            let len = label.chars().count() as u16;
            if len > 0 && len <= self.config.bar_width {
                let row = bottom + (top - bottom - 1) / 2;
                let y = inner.bottom() - 1 - row;
                let lx = x + (self.config.bar_width - len) / 2;
                buf.set_string(lx, y, &label, Style::default().fg(Color::Black).bg(*color));
            }

            bottom = top;
        }
    }
}

impl Widget for StackedBarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = self.config.block();
        if let Some(footer) = &self.footer {
            block = block.title_bottom(Line::from(footer.as_str()).alignment(Alignment::Right));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.is_empty() {
            return;
        }

        // u32 so that a bar width near u16::MAX cannot overflow.
        let width = self.config.bar_width as u32;
        let stride = width + 1;
        for (i, values) in self.bars.iter().enumerate() {
            let offset = i as u32 * stride;
            if offset + width > inner.width as u32 {
                break;
            }
            self.render_bar(values, inner.x + offset as u16, inner, buf);
        }
    }
}
