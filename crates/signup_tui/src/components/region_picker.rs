use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use signup::{REGIONS, Region};

use super::{
    Component,
    popup::{centered_rect_fixed, draw_popup_frame},
};
use crate::{
    action::{Action, PopupResult},
    theme::Theme,
    tui::{EventResponse, Frame},
};

/// Modal list of every region, in table order.
///
/// Emits `PopupResult::RegionChosen(name)` on Enter and
/// `PopupResult::Cancelled` on Esc; either result closes the popup.
pub struct RegionPicker {
    options: &'static [Region],
    selected: usize,
    scroll: usize,
    theme: Theme,
    width: u16,
    height: u16,
}

impl RegionPicker {
    pub fn new(selected: Option<usize>, theme: Theme) -> Self {
        Self {
            options: REGIONS,
            selected: selected.unwrap_or(0).min(REGIONS.len().saturating_sub(1)),
            scroll: 0,
            theme,
            width: 44,
            height: 16,
        }
    }

    pub fn selected(&self) -> Option<&'static Region> {
        self.options.get(self.selected)
    }

    fn move_by(&mut self, delta: isize) {
        let len = self.options.len() as isize;
        if len == 0 {
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    /// Keep the selection inside a window of `max_visible` rows.
    fn ensure_visible(&mut self, max_visible: usize) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + max_visible {
            self.scroll = self.selected + 1 - max_visible;
        }
    }
}

impl Component for RegionPicker {
    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.move_by(-1);
                Action::Update
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_by(1);
                Action::Update
            }
            KeyCode::PageUp => {
                self.move_by(-5);
                Action::Update
            }
            KeyCode::PageDown => {
                self.move_by(5);
                Action::Update
            }
            KeyCode::Home => {
                self.selected = 0;
                Action::Update
            }
            KeyCode::End => {
                self.selected = self.options.len().saturating_sub(1);
                Action::Update
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected() {
                Some(region) => {
                    Action::PopupResult(PopupResult::RegionChosen(region.name.to_string()))
                }
                None => Action::PopupResult(PopupResult::Cancelled),
            },
            KeyCode::Esc => Action::PopupResult(PopupResult::Cancelled),
            // Modal: nothing reaches the form underneath.
            _ => Action::Update,
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::PopupResult(_) => Ok(Some(Action::ClosePopup)),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let dialog = centered_rect_fixed(area, self.width, self.height);
        let inner = draw_popup_frame(f, dialog, "Region", &self.theme);

        let max_visible = inner.height.saturating_sub(2).max(1) as usize;
        self.ensure_visible(max_visible);
        let end = (self.scroll + max_visible).min(self.options.len());

        let mut lines: Vec<Line> = Vec::new();
        for (idx, region) in self.options[self.scroll..end].iter().enumerate() {
            let label = format!("{:<28}{:>6}", region.name, region.code);
            if self.scroll + idx == self.selected {
                lines.push(Line::from(vec![
                    Span::raw("> "),
                    Span::styled(
                        label,
                        Style::default()
                            .fg(self.theme.roles.inverted_text)
                            .bg(self.theme.roles.primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(label, Style::default().fg(self.theme.roles.text)),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(
            Line::from(vec![
                Span::raw("↑/↓ select  "),
                Span::raw("Enter choose  "),
                Span::raw("Esc cancel"),
            ])
            .style(Style::default().fg(self.theme.roles.subtle_text)),
        );

        f.render_widget(
            Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }),
            inner,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(picker: &mut RegionPicker, code: KeyCode) -> Action {
        match picker.handle_key_events(key(code)).unwrap() {
            Some(EventResponse::Stop(a)) => a,
            other => panic!("picker must swallow keys, got {other:?}"),
        }
    }

    #[test]
    fn preselects_and_wraps_around() {
        let mut picker = RegionPicker::new(Some(0), Theme::default());
        press(&mut picker, KeyCode::Up);
        assert_eq!(picker.selected().map(|r| r.name), REGIONS.last().map(|r| r.name));
        press(&mut picker, KeyCode::Down);
        assert_eq!(picker.selected().map(|r| r.name), Some("India"));
    }

    #[test]
    fn enter_reports_the_highlighted_region() {
        let mut picker = RegionPicker::new(Some(1), Theme::default());
        let action = press(&mut picker, KeyCode::Enter);
        assert_eq!(
            action,
            Action::PopupResult(PopupResult::RegionChosen("United States".into()))
        );
        assert_eq!(picker.update(action).unwrap(), Some(Action::ClosePopup));
    }

    #[test]
    fn escape_cancels() {
        let mut picker = RegionPicker::new(None, Theme::default());
        assert_eq!(
            press(&mut picker, KeyCode::Esc),
            Action::PopupResult(PopupResult::Cancelled)
        );
    }

    #[test]
    fn out_of_range_preselection_is_clamped() {
        let picker = RegionPicker::new(Some(usize::MAX), Theme::default());
        assert_eq!(picker.selected().map(|r| r.name), REGIONS.last().map(|r| r.name));
    }
}
