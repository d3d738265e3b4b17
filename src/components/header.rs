use crate::session::Session;
use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Common header bar for all screens: title on the left, session status
/// on the right.
pub struct Header;

impl Header {
    /// Render the header and return the height used.
    pub fn render(frame: &mut Frame, area: Rect, title: &str, session: &Session) -> Result<u16> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(" canvass ")
            .title_style(t.title_style());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(inner);

        let title_para = Paragraph::new(title)
            .style(t.title_style())
            .alignment(Alignment::Left);
        frame.render_widget(title_para, chunks[0]);

        let status = match session {
            Session::Authenticated { name } => format!("logged in as {}", name),
            Session::Anonymous => "not logged in".to_string(),
            Session::Unknown => "checking session...".to_string(),
        };
        let status_para = Paragraph::new(status)
            .style(t.muted_style())
            .alignment(Alignment::Right);
        frame.render_widget(status_para, chunks[1]);

        Ok(area.height)
    }
}
