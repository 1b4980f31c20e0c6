use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use signup::{
    FieldKey, InputOutcome, REGIONS, SignupForm, Submitter,
    regions::region_index,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};
use tui_input::{Input, InputRequest, backend::crossterm::EventHandler as _};

use super::Component;
use crate::{
    action::{Action, PopupResult, SubmissionOutcome},
    theme::Theme,
    tui::{EventResponse, Frame},
};

/// Focusable slots, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    FirstName,
    LastName,
    Region,
    PhoneNumber,
    Email,
    Submit,
}

const FOCUS_ORDER: [Focus; 6] = [
    Focus::FirstName,
    Focus::LastName,
    Focus::Region,
    Focus::PhoneNumber,
    Focus::Email,
    Focus::Submit,
];

impl Focus {
    fn next(self) -> Self {
        let i = FOCUS_ORDER.iter().position(|f| *f == self).unwrap_or(0);
        FOCUS_ORDER[(i + 1) % FOCUS_ORDER.len()]
    }

    fn prev(self) -> Self {
        let i = FOCUS_ORDER.iter().position(|f| *f == self).unwrap_or(0);
        FOCUS_ORDER[(i + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len()]
    }

    /// The text field behind this slot, if it is one.
    fn text_field(self) -> Option<FieldKey> {
        match self {
            Focus::FirstName => Some(FieldKey::FirstName),
            Focus::LastName => Some(FieldKey::LastName),
            Focus::PhoneNumber => Some(FieldKey::PhoneNumber),
            Focus::Email => Some(FieldKey::Email),
            Focus::Region | Focus::Submit => None,
        }
    }
}

#[derive(Default)]
struct Inputs {
    first_name: Input,
    last_name: Input,
    phone_number: Input,
    email: Input,
}

impl Inputs {
    fn get(&self, field: FieldKey) -> Option<&Input> {
        match field {
            FieldKey::FirstName => Some(&self.first_name),
            FieldKey::LastName => Some(&self.last_name),
            FieldKey::PhoneNumber => Some(&self.phone_number),
            FieldKey::Email => Some(&self.email),
            FieldKey::Region => None,
        }
    }

    fn get_mut(&mut self, field: FieldKey) -> Option<&mut Input> {
        match field {
            FieldKey::FirstName => Some(&mut self.first_name),
            FieldKey::LastName => Some(&mut self.last_name),
            FieldKey::PhoneNumber => Some(&mut self.phone_number),
            FieldKey::Email => Some(&mut self.email),
            FieldKey::Region => None,
        }
    }
}

/// The sign-up form: name pair, region with derived code, phone, email and a
/// submit button.
///
/// Every edit goes through `SignupForm::apply_input`, and the editor is then
/// resynchronised from the form so rejected keystrokes vanish and phone
/// numbers show their grouping immediately.
pub struct SignupFormComponent {
    tx: Option<UnboundedSender<Action>>,
    theme: Theme,
    submitter: Submitter,
    form: SignupForm,
    inputs: Inputs,
    focus: Focus,
    submitting: bool,
}

impl SignupFormComponent {
    pub fn new(submitter: Submitter) -> Self {
        Self {
            tx: None,
            theme: Theme::default(),
            submitter,
            form: SignupForm::new(),
            inputs: Inputs::default(),
            focus: Focus::FirstName,
            submitting: false,
        }
    }

    #[cfg(test)]
    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    #[cfg(test)]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[cfg(test)]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn clear(&mut self) {
        self.form.reset();
        self.inputs = Inputs::default();
        self.focus = Focus::FirstName;
    }

    /// Push the editor's current text through the form and mirror the result back.
    ///
    /// `prev_cursor` is where the cursor sat before the edit; a rejected edit
    /// puts it back there. A regrouped phone number keeps the cursor behind the
    /// same digit.
    fn commit_edit(&mut self, field: FieldKey, prev_cursor: usize) {
        let Some(input) = self.inputs.get(field) else {
            return;
        };
        let typed = input.value().to_string();
        let typed_cursor = input.cursor();
        let outcome = self.form.apply_input(field, &typed);
        let stored = self.form.value(field);
        if stored == typed {
            return;
        }

        let cursor = match outcome {
            InputOutcome::Rejected => {
                debug!(%field, "rejected input");
                prev_cursor
            }
            InputOutcome::Accepted if field == FieldKey::PhoneNumber => {
                let digits_before = typed
                    .chars()
                    .take(typed_cursor)
                    .filter(char::is_ascii_digit)
                    .count();
                cursor_after_digits(stored, digits_before)
            }
            InputOutcome::Accepted => typed_cursor,
        };
        let rebuilt = input_at(stored.to_string(), cursor);
        if let Some(input) = self.inputs.get_mut(field) {
            *input = rebuilt;
        }
    }

    fn cycle_region(&mut self, delta: isize) {
        let len = REGIONS.len() as isize;
        let next = match region_index(self.form.value(FieldKey::Region)) {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.form.select_region(REGIONS[next as usize].name);
    }

    fn submit(&mut self) -> Option<Action> {
        if self.submitting {
            debug!("submission already in flight");
            return None;
        }
        if let Err(errors) = self.form.validate() {
            debug!(count = errors.len(), "form has validation errors");
            return Some(Action::Notify(format!(
                "{} field(s) need attention",
                errors.len()
            )));
        }

        let Some(tx) = self.tx.clone() else {
            return Some(Action::Error("form is not connected to the event loop".into()));
        };
        self.submitting = true;
        let submitter = self.submitter.clone();
        let values = self.form.values().clone();
        info!(endpoint = %submitter.endpoint(), "submitting sign-up form");

        tokio::spawn(async move {
            let outcome = match submitter.submit(&values).await {
                Ok(receipt) => SubmissionOutcome::Accepted {
                    status: receipt.status,
                },
                Err(err) => SubmissionOutcome::Failed(err.summary()),
            };
            let _ = tx.send(Action::SubmissionFinished(outcome));
        });
        Some(Action::Update)
    }

    fn handle_text_key(&mut self, field: FieldKey, key: KeyEvent) -> Action {
        let Some(input) = self.inputs.get_mut(field) else {
            return Action::Update;
        };
        let prev_cursor = input.cursor();
        input.handle_event(&crossterm::event::Event::Key(key));
        self.commit_edit(field, prev_cursor);
        Action::Update
    }
}

/// An editor holding `value` with the cursor `cursor` chars in (clamped to the end).
fn input_at(value: String, cursor: usize) -> Input {
    let mut input = Input::new(value);
    input.handle(InputRequest::GoToStart);
    for _ in 0..cursor {
        if input.handle(InputRequest::GoToNextChar).is_none() {
            break;
        }
    }
    input
}

/// Char index just past the `n`th digit of `value`, or 0 when `n` is 0.
fn cursor_after_digits(value: &str, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    value
        .chars()
        .enumerate()
        .filter(|(_, c)| c.is_ascii_digit())
        .nth(n - 1)
        .map_or(value.chars().count(), |(i, _)| i + 1)
}

impl Component for SignupFormComponent {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.tx = Some(tx);
        Ok(())
    }

    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return Ok(Some(EventResponse::Stop(Action::Submit)));
        }

        let action = match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                Action::Update
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                Action::Update
            }
            KeyCode::Esc => Action::ClearForm,
            _ => match self.focus {
                Focus::Region => match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') => Action::OpenRegionPicker {
                        selected: region_index(self.form.value(FieldKey::Region)),
                    },
                    KeyCode::Left => {
                        self.cycle_region(-1);
                        Action::Update
                    }
                    KeyCode::Right => {
                        self.cycle_region(1);
                        Action::Update
                    }
                    _ => return Ok(None),
                },
                Focus::Submit => match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') => Action::Submit,
                    KeyCode::Char('q') => Action::Quit,
                    _ => return Ok(None),
                },
                text => {
                    let Some(field) = text.text_field() else {
                        return Ok(None);
                    };
                    if key.code == KeyCode::Enter {
                        self.focus = self.focus.next();
                        Action::Update
                    } else {
                        self.handle_text_key(field, key)
                    }
                }
            },
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn handle_paste(&mut self, text: String) -> Result<Option<EventResponse<Action>>> {
        let Some(field) = self.focus.text_field() else {
            return Ok(None);
        };
        let Some(input) = self.inputs.get_mut(field) else {
            return Ok(None);
        };
        let prev_cursor = input.cursor();
        for c in text.chars().filter(|c| !matches!(c, '\r' | '\n')) {
            input.handle(InputRequest::InsertChar(c));
        }
        self.commit_edit(field, prev_cursor);
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Submit => Ok(self.submit()),
            Action::SubmissionFinished(SubmissionOutcome::Accepted { .. }) => {
                self.submitting = false;
                self.clear();
                Ok(Some(Action::Update))
            }
            Action::SubmissionFinished(SubmissionOutcome::Failed(_)) => {
                self.submitting = false;
                Ok(Some(Action::Update))
            }
            Action::ClearForm => {
                self.clear();
                Ok(Some(Action::Update))
            }
            Action::PopupResult(PopupResult::RegionChosen(name)) => {
                self.form.select_region(&name);
                self.focus = Focus::PhoneNumber;
                Ok(Some(Action::Update))
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [title, row_names, row_region, row_phone, row_email, button, _] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Fill(1),
            ])
            .areas(area);

        f.render_widget(
            Paragraph::new(Line::from("Sign Up").style(self.theme.title())).centered(),
            title,
        );

        let [first, last] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(row_names);
        self.render_text_field(f, first, FieldKey::FirstName);
        self.render_text_field(f, last, FieldKey::LastName);

        let [region, code] =
            Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).areas(row_region);
        self.render_region(f, region);
        self.render_region_code(f, code);

        self.render_text_field(f, row_phone, FieldKey::PhoneNumber);
        self.render_text_field(f, row_email, FieldKey::Email);
        self.render_button(f, button);
        Ok(())
    }
}

impl SignupFormComponent {
    fn field_block(&self, label: &str, focused: bool) -> Block<'static> {
        let (title_style, border_style) = if focused {
            (self.theme.title(), self.theme.focused_border())
        } else {
            (
                Style::default().fg(self.theme.roles.subtle_text),
                self.theme.border(),
            )
        };
        Block::bordered()
            .title(label.to_string())
            .title_style(title_style)
            .border_set(border::ROUNDED)
            .border_style(border_style)
    }

    /// Input box in the top three rows, error message in the fourth.
    fn split_field(area: Rect) -> (Rect, Rect) {
        let [input, error] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);
        (input, error)
    }

    fn render_error(&self, f: &mut Frame<'_>, area: Rect, field: FieldKey) {
        if let Some(err) = self.form.error(field) {
            f.render_widget(
                Paragraph::new(Span::styled(format!(" {err}"), self.theme.error())),
                area,
            );
        }
    }

    fn render_text_field(&self, f: &mut Frame<'_>, area: Rect, field: FieldKey) {
        let Some(input) = self.inputs.get(field) else {
            return;
        };
        let (input_area, error_area) = Self::split_field(area);
        let focused = self.focus.text_field() == Some(field);

        // keep 2 for borders and 1 for cursor
        let width = input_area.width.max(3) - 3;
        let scroll = input.visual_scroll(width as usize);

        let block = self.field_block(field.label(), focused);
        let invalid = self.form.error(field).is_some();
        let block = if invalid && !focused {
            block.border_style(self.theme.error())
        } else {
            block
        };

        let paragraph = Paragraph::new(input.value())
            .scroll((0, scroll as u16))
            .style(Style::default().fg(self.theme.roles.text))
            .block(block);
        f.render_widget(paragraph, input_area);
        self.render_error(f, error_area, field);

        if focused {
            let x = input.visual_cursor().max(scroll) - scroll + 1;
            f.set_cursor_position((input_area.x + x as u16, input_area.y + 1));
        }
    }

    fn render_region(&self, f: &mut Frame<'_>, area: Rect) {
        let (input_area, error_area) = Self::split_field(area);
        let focused = self.focus == Focus::Region;
        let value = self.form.value(FieldKey::Region);

        let line = if value.is_empty() {
            Line::from(Span::styled(
                "Select a region ▾",
                Style::default().fg(self.theme.roles.subtle_text),
            ))
        } else {
            Line::from(vec![
                Span::styled(value.to_string(), Style::default().fg(self.theme.roles.text)),
                Span::styled(" ▾", Style::default().fg(self.theme.roles.subtle_text)),
            ])
        };
        let mut block = self.field_block(FieldKey::Region.label(), focused);
        if self.form.error(FieldKey::Region).is_some() && !focused {
            block = block.border_style(self.theme.error());
        }
        f.render_widget(Paragraph::new(line).block(block), input_area);
        self.render_error(f, error_area, FieldKey::Region);
    }

    fn render_region_code(&self, f: &mut Frame<'_>, area: Rect) {
        let (input_area, _) = Self::split_field(area);
        let block = Block::bordered()
            .title("Region Code")
            .title_style(Style::default().fg(self.theme.roles.subtle_text))
            .border_set(border::ROUNDED)
            .border_style(self.theme.border());
        let code = Paragraph::new(self.form.region_code())
            .style(Style::default().fg(self.theme.roles.muted))
            .block(block);
        f.render_widget(code, input_area);
    }

    fn render_button(&self, f: &mut Frame<'_>, area: Rect) {
        let [_, button, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(18),
            Constraint::Fill(1),
        ])
        .areas(area);

        let label = if self.submitting {
            "Submitting…"
        } else {
            "Submit"
        };
        let style = if self.focus == Focus::Submit {
            Style::default()
                .fg(self.theme.roles.inverted_text)
                .bg(self.theme.roles.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.roles.primary)
        };
        let widget = Paragraph::new(label).centered().style(style).block(
            Block::bordered()
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(self.theme.roles.primary)),
        );
        f.render_widget(widget, button);
    }
}
