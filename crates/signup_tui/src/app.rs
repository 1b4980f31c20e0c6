use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use signup::Submitter;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error};

use crate::{
    action::Action,
    components::{
        Component, banner::Banner, region_picker::RegionPicker, signup_form::SignupFormComponent,
        status_bar::StatusBar,
    },
    config::Config,
    theme::Theme,
    tui::{Event, EventResponse, Frame, Tui},
};

const FORM_WIDTH: u16 = 64;

pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub form: SignupFormComponent,
    pub banner: Banner,
    pub status: StatusBar,
    pub popup: Option<Box<dyn Component>>,
    pub should_quit: bool,
    pub should_suspend: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let submitter = Submitter::new(&config.endpoint, config.request_timeout())?;
        let theme = Theme::by_name(&config.theme);
        debug!(theme = %theme.name, endpoint = %config.endpoint, "app configured");

        Ok(Self {
            form: SignupFormComponent::new(submitter),
            banner: Banner::new(config.banner_duration()),
            status: StatusBar::new(config.endpoint.clone()),
            theme,
            config,
            popup: None,
            should_quit: false,
            should_suspend: false,
        })
    }

    fn components(&mut self) -> [&mut dyn Component; 3] {
        [&mut self.form, &mut self.banner, &mut self.status]
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = Tui::new()?
            .tick_rate(self.config.tick_rate)
            .frame_rate(self.config.frame_rate)
            .paste(true);
        tui.enter()?;

        let theme = self.theme.clone();
        for component in self.components() {
            component.register_action_handler(action_tx.clone())?;
            component.register_theme(theme.clone())?;
        }

        loop {
            if let Some(e) = tui.next().await {
                self.handle_event(e, &action_tx)?;
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match &action {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.draw(&mut tui, &action_tx)?;
                    }
                    Action::Render => self.draw(&mut tui, &action_tx)?,
                    Action::OpenRegionPicker { selected } => {
                        self.popup = Some(Box::new(RegionPicker::new(*selected, self.theme.clone())));
                    }
                    Action::ClosePopup => self.popup = None,
                    Action::Error(msg) => error!("{msg}"),
                    _ => {}
                }

                if let Some(popup) = &mut self.popup {
                    if let Some(next) = popup.update(action.clone())? {
                        action_tx.send(next)?;
                    }
                }
                for component in self.components() {
                    if let Some(next) = component.update(action.clone())? {
                        action_tx.send(next)?;
                    }
                }
            }

            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    /// Route one terminal event: global keys first, then the popup, then the form.
    fn handle_event(&mut self, e: Event, action_tx: &UnboundedSender<Action>) -> Result<()> {
        match &e {
            Event::Tick => return Ok(action_tx.send(Action::Tick)?),
            Event::Render => return Ok(action_tx.send(Action::Render)?),
            Event::Resize(x, y) => return Ok(action_tx.send(Action::Resize(*x, *y))?),
            Event::Key(key) => {
                if let Some(action) = global_action(key) {
                    return Ok(action_tx.send(action)?);
                }
            }
            _ => {}
        }

        // Modal: the form underneath never sees events while a popup is open.
        let response = match &mut self.popup {
            Some(popup) => popup.handle_events(e)?,
            None => self.form.handle_events(e)?,
        };
        if let Some(EventResponse::Stop(action)) = response {
            action_tx.send(action)?;
        }
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            if let Err(err) = self.render(f) {
                action_tx
                    .send(Action::Error(format!("Failed to draw: {err:?}")))
                    .ok();
            }
        })?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let [column] = Layout::horizontal([Constraint::Length(FORM_WIDTH)])
            .flex(Flex::Center)
            .areas(frame.area());
        let [banner, form, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(column);

        self.banner.draw(frame, banner)?;
        self.form.draw(frame, form)?;
        self.status.draw(frame, status)?;

        if let Some(popup) = &mut self.popup {
            let area = frame.area();
            popup.draw(frame, area)?;
        }
        Ok(())
    }
}

/// Keys that work regardless of focus or popups.
fn global_action(key: &KeyEvent) -> Option<Action> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') => Some(Action::Quit),
        KeyCode::Char('z') => Some(Action::Suspend),
        _ => None,
    }
}
