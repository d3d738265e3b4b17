//! Widget for rendering [`TextInput`] fields with consistent styling:
//! focus-dependent borders, placeholder text, password masking, and a
//! disabled state for preview-mode editors.

use crate::styles::theme;
use crate::utils::text_input::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    focused: bool,
    disabled: bool,
    masked: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            title: None,
            placeholder: None,
            focused: false,
            disabled: false,
            masked: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Mask the text with bullets (for passwords).
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    fn display_text(&self) -> String {
        let text = self.input.text();
        if text.is_empty() {
            self.placeholder.unwrap_or("").to_string()
        } else if self.masked {
            "•".repeat(text.chars().count())
        } else {
            text.to_string()
        }
    }

    fn text_style(&self) -> Style {
        let t = theme();
        if self.disabled || self.input.text().is_empty() {
            t.muted_style()
        } else {
            t.text_style()
        }
    }

    fn border_style(&self) -> Style {
        let t = theme();
        if self.disabled {
            t.muted_style()
        } else if self.focused {
            t.border_focused_style()
        } else {
            t.border_style()
        }
    }

    fn create_block(&self) -> Block<'a> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());
        if let Some(title) = self.title {
            block = block.title(format!(" {} ", title));
        }
        block
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.create_block();
        let paragraph = Paragraph::new(self.display_text())
            .block(block)
            .style(self.text_style());
        paragraph.render(area, buf);
    }
}

/// Extension trait for `Frame` so a focused input also places the
/// terminal cursor; the plain `Widget` impl has no access to the frame.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let focused = widget.focused;
        let disabled = widget.disabled;
        let cursor = widget.input.cursor();
        let inner = widget.create_block().inner(area);

        self.render_widget(widget, area);

        if focused && !disabled {
            let x = inner.x + cursor.min(inner.width.saturating_sub(1) as usize) as u16;
            self.set_cursor_position((x, inner.y));
        }
    }
}
