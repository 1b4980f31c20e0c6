use std::time::{Duration, Instant};

use color_eyre::Result;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Paragraph},
};

use super::Component;
use crate::{
    action::{Action, SubmissionOutcome},
    theme::Theme,
    tui::Frame,
};

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Transient success banner shown after an accepted submission.
pub struct Banner {
    theme: Theme,
    duration: Duration,
    visible_until: Option<Instant>,
}

impl Banner {
    pub fn new(duration: Duration) -> Self {
        Self {
            theme: Theme::default(),
            duration,
            visible_until: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    fn is_visible_at(&self, now: Instant) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }

    fn show(&mut self, now: Instant) {
        self.visible_until = Some(now + self.duration);
    }

    /// Drop the deadline once passed. Returns true if that hid the banner.
    fn expire(&mut self, now: Instant) -> bool {
        match self.visible_until {
            Some(until) if now >= until => {
                self.visible_until = None;
                true
            }
            _ => false,
        }
    }
}

impl Component for Banner {
    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::SubmissionFinished(SubmissionOutcome::Accepted { .. }) => {
                self.show(Instant::now());
                Ok(Some(Action::Update))
            }
            Action::Tick if self.expire(Instant::now()) => Ok(Some(Action::Update)),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }
        let banner = Paragraph::new(SUCCESS_MESSAGE)
            .centered()
            .style(
                Style::default()
                    .fg(self.theme.roles.inverted_text)
                    .bg(self.theme.roles.success)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::bordered()
                    .border_set(border::ROUNDED)
                    .border_style(Style::default().fg(self.theme.roles.success)),
            );
        f.render_widget(banner, area);
        Ok(())
    }
}
