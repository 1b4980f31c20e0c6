use std::time::{Duration, Instant};

use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::{
    action::{Action, SubmissionOutcome},
    theme::Theme,
    tui::Frame,
};

const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Error,
}

/// Bottom line: the latest notice on the left, key hints on the right.
pub struct StatusBar {
    theme: Theme,
    endpoint: String,
    notice: Option<(String, Tone, Instant)>,
}

impl StatusBar {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            theme: Theme::default(),
            endpoint: endpoint.into(),
            notice: None,
        }
    }

    #[cfg(test)]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(msg, _, _)| msg.as_str())
    }

    fn set(&mut self, msg: impl Into<String>, tone: Tone) {
        self.notice = Some((msg.into(), tone, Instant::now()));
    }
}

impl Component for StatusBar {
    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Notify(msg) => self.set(msg, Tone::Info),
            Action::Error(msg) => self.set(msg, Tone::Error),
            Action::SubmissionFinished(SubmissionOutcome::Failed(msg)) => {
                self.set(msg, Tone::Error)
            }
            Action::SubmissionFinished(SubmissionOutcome::Accepted { status }) => {
                self.set(format!("Accepted by backend (HTTP {status})"), Tone::Info)
            }
            Action::ClearForm => self.notice = None,
            Action::Tick => {
                if self
                    .notice
                    .as_ref()
                    .is_some_and(|(_, _, at)| at.elapsed() >= NOTICE_TTL)
                {
                    self.notice = None;
                    return Ok(Some(Action::Update));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(44)]).areas(area);

        let left_line = match &self.notice {
            Some((msg, tone, _)) => {
                let color = match tone {
                    Tone::Info => self.theme.roles.info,
                    Tone::Error => self.theme.roles.danger,
                };
                Line::from(Span::styled(msg.clone(), Style::default().fg(color)))
            }
            None => Line::from(Span::styled(
                format!("→ {}", self.endpoint),
                Style::default().fg(self.theme.roles.subtle_text),
            )),
        };
        f.render_widget(Paragraph::new(left_line), left);

        let hints = Line::from("Tab next  Ctrl-S submit  Esc clear  Ctrl-C quit")
            .style(Style::default().fg(self.theme.roles.subtle_text))
            .right_aligned();
        f.render_widget(Paragraph::new(hints), right);
        Ok(())
    }
}
