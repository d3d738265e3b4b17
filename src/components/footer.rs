use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Common footer showing the key hints of the current screen.
///
/// Hints use the form `"Label: keys | Label: keys"`; labels and keys get
/// distinct colors so the line scans quickly.
pub struct Footer;

impl Footer {
    pub fn render(frame: &mut Frame, area: Rect, text: &str) -> Result<u16> {
        let t = theme();
        let mut spans = Vec::new();

        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            if let Some((label, keys)) = part.split_once(": ") {
                spans.push(Span::styled(
                    format!("{}: ", label),
                    Style::default()
                        .fg(t.primary)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    keys.to_string(),
                    Style::default()
                        .fg(t.warning)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(part.to_string(), t.text_style()));
            }
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(t.border_focused_style());
        let inner = block.inner(area);

        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            inner,
        );

        Ok(2)
    }
}
