//! Transient message widget.
//!
//! The application has exactly one message slot: a new message overwrites
//! the previous one rather than queuing, and the slot auto-clears after a
//! fixed delay. Rendered in the bottom-right corner without shifting the
//! rest of the UI.

use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};
use std::time::{Duration, Instant};

/// Message variant for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    /// Success notification (survey created, reply submitted)
    Success,
    /// Informational notice (welcome message)
    Info,
    /// Error notification (auth and network failures)
    Error,
}

impl ToastVariant {
    fn icon(self) -> &'static str {
        match self {
            ToastVariant::Success => "\u{2714}", // ✔
            ToastVariant::Info => "\u{2139}",    // ℹ
            ToastVariant::Error => "\u{2718}",   // ✘
        }
    }

    fn color(self) -> ratatui::style::Color {
        let t = theme();
        match self {
            ToastVariant::Success => t.success,
            ToastVariant::Info => t.primary,
            ToastVariant::Error => t.error,
        }
    }
}

/// One transient message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, variant: ToastVariant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            variant,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Whether the display delay has elapsed.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Widget rendering one toast in the bottom-right corner of `area`.
struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 44u16.min(area.width.saturating_sub(4));
        let height = 3u16;
        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(height + 3);
        let toast_area = Rect::new(x, y, width, height);

        let t = theme();
        Widget::render(Clear, toast_area, buf);

        let message = format!(" {} {} ", self.toast.variant.icon(), self.toast.message);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.toast.variant.color()))
            .style(Style::default().bg(t.background));

        let paragraph = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(t.text).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });

        Widget::render(paragraph, toast_area, buf);
    }
}

/// The single message slot.
#[derive(Debug)]
pub struct ToastManager {
    current: Option<Toast>,
    duration: Duration,
}

impl ToastManager {
    /// Create a manager whose messages expire after `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Show a message, replacing any message already on screen.
    pub fn push(&mut self, message: impl Into<String>, variant: ToastVariant) {
        self.current = Some(Toast::new(message, variant, self.duration));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, ToastVariant::Success);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, ToastVariant::Info);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, ToastVariant::Error);
    }

    /// Drop the message once its delay has elapsed.
    pub fn tick(&mut self) {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Dismiss the message immediately (user pressed a dismiss key).
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Render the current message (if any).
    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        if let Some(toast) = self.current() {
            frame.render_widget(ToastWidget { toast }, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_overwrites_previous() {
        let mut toasts = ToastManager::new(Duration::from_secs(5));
        toasts.error("first");
        toasts.info("second");
        assert_eq!(toasts.current().unwrap().message, "second");
        assert_eq!(toasts.current().unwrap().variant, ToastVariant::Info);
    }

    #[test]
    fn expired_message_is_dropped_on_tick() {
        let mut toasts = ToastManager::new(Duration::from_secs(0));
        toasts.success("done");
        toasts.tick();
        assert!(toasts.current().is_none());
    }

    #[test]
    fn unexpired_message_survives_tick() {
        let mut toasts = ToastManager::new(Duration::from_secs(60));
        toasts.success("done");
        toasts.tick();
        assert!(toasts.current().is_some());
    }

    #[test]
    fn dismiss_clears_immediately() {
        let mut toasts = ToastManager::new(Duration::from_secs(60));
        toasts.error("oops");
        toasts.dismiss();
        assert!(toasts.current().is_none());
    }
}
