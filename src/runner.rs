//! Entry point running the dropdown in the terminal
use std::io::Stderr;
use std::sync::Arc;

use color_eyre::eyre::{self, OptionExt, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use tokio::{runtime::Handle, task::block_in_place};

use crate::theme::ColorTheme;
use crate::tui::{App, Event, Size, Tui, event::Action};
use crate::{SelectOption, SelectOptions, SelectOutput};

/// Runs the dropdown until the user accepts or aborts
pub struct Dropsel<Backend = CrosstermBackend<Stderr>>
where
    Backend: ratatui::backend::Backend,
    Backend::Error: Send + Sync + 'static,
{
    app: App,
    tui: Option<Tui<Backend>>,
    height: Size,
    final_event: Event,
    final_key: KeyEvent,
}

impl Dropsel {
    /// Shows the dropdown over `choices` and waits for the user
    ///
    /// With `select_1` and a single choice, or `exit_0` and no choice, the terminal is not
    /// touched at all.
    pub fn run_with(options: SelectOptions, choices: Vec<SelectOption>) -> Result<SelectOutput> {
        trace!("running dropsel over {} options", choices.len());
        let mut dropsel = Self::init(options, choices)?;

        if dropsel.should_enter() {
            dropsel.init_tui()?;
            let task = async {
                dropsel.enter()?;
                dropsel.run().await?;
                eyre::Ok(())
            };

            if let Ok(handle) = Handle::try_current() {
                block_in_place(|| handle.block_on(task))?;
            } else {
                let rt = tokio::runtime::Runtime::new()?;
                rt.block_on(task)?;
            }
        } else {
            dropsel.final_event = Event::Action(Action::Accept);
        }
        let output = dropsel.output();
        debug!("output: {output:?}");

        Ok(output)
    }

    /// Initialize the TUI with the default crossterm backend, but do not enter it yet
    pub fn init_tui(&mut self) -> Result<()> {
        let mut tui = Tui::new_with_height(CrosstermBackend::new(std::io::stderr()), self.height)?;
        tui.mouse = !self.app.options.no_mouse;
        self.tui = Some(tui);
        Ok(())
    }
}

impl<Backend: ratatui::backend::Backend + 'static> Dropsel<Backend>
where
    Backend::Error: Send + Sync + 'static,
{
    /// Builds the application state, without touching the terminal
    pub fn init(options: SelectOptions, choices: Vec<SelectOption>) -> Result<Self> {
        let height = Size::try_from(options.height.as_str())?;
        let theme = Arc::new(ColorTheme::init_from_options(&options));
        let app = App::from_options(options, theme, choices);
        Ok(Self {
            app,
            tui: None,
            height,
            final_event: Event::Quit,
            final_key: KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()),
        })
    }

    /// Initialize the TUI with a caller-provided instance.
    ///
    /// Use this instead of [`init_tui()`](Dropsel::init_tui) when you need a
    /// non-default backend (e.g. `TestBackend` for snapshot tests).
    pub fn init_tui_with(&mut self, tui: Tui<Backend>) {
        self.tui = Some(tui);
    }

    /// Returns a shared reference to the application state.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Returns a mutable reference to the application state.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Returns a mutable reference to the TUI.
    ///
    /// # Panics
    ///
    /// Panics if the TUI has not been initialized yet.
    pub fn tui_mut(&mut self) -> &mut Tui<Backend> {
        self.tui.as_mut().expect("TUI needs to be initialized before access")
    }

    /// Returns mutable references to both the app and the TUI simultaneously.
    ///
    /// # Panics
    ///
    /// Panics if the TUI has not been initialized yet.
    pub fn app_and_tui(&mut self) -> (&mut App, &mut Tui<Backend>) {
        (
            &mut self.app,
            self.tui.as_mut().expect("TUI needs to be initialized before access"),
        )
    }

    /// Returns a shared reference to the final event that caused dropsel to quit.
    pub fn final_event(&self) -> &Event {
        &self.final_event
    }

    /// Enter the TUI
    pub fn enter(&mut self) -> Result<()> {
        debug!("entering TUI");
        self.tui
            .as_mut()
            .ok_or_eyre("TUI needs to be initialized using Dropsel::init_tui before entering")?
            .enter()
    }

    /// Checks select-1 and exit-0, returns whether the widget needs to be shown
    fn should_enter(&mut self) -> bool {
        let options = &self.app.options;
        let choices = &self.app.select.props.options;
        if options.exit_0 && choices.is_empty() {
            debug!("no options, exiting early");
            return false;
        }
        if options.select_1 && choices.len() == 1 {
            let only = choices[0].clone();
            debug!("single option {:?}, selecting it", only.value);
            self.app.select.select_option(&only);
            self.app.update();
            return false;
        }
        true
    }

    /// Capture `self` and extract the output
    pub fn output(self) -> SelectOutput {
        let is_abort = !matches!(&self.final_event, Event::Action(Action::Accept));
        let selected = self.app.selected();
        SelectOutput {
            value: self.app.select.props.value.clone(),
            label: selected.map(|o| o.label.clone()),
            final_event: self.final_event.clone(),
            final_key: self.final_key,
            is_abort,
        }
    }

    /// Returns true if dropsel has finished (the user accepted or aborted)
    pub fn should_quit(&self) -> bool {
        self.app.should_quit
    }

    /// Process a single event loop iteration.
    ///
    /// Returns `Ok(true)` if dropsel should quit, `Ok(false)` to continue.
    pub async fn tick(&mut self) -> Result<bool> {
        let tui = self
            .tui
            .as_mut()
            .ok_or_eyre("TUI should be initialized before the event loop can start")?;
        let evt = tui.next().await.ok_or_eyre("Could not acquire next event")?;

        if let Event::Key(k) = &evt {
            self.final_key = k.to_owned();
        } else {
            self.final_event = evt.to_owned();
        }
        self.app.handle_event(tui, &evt)?;

        Ok(self.app.should_quit)
    }

    /// Run the event loop on the current task until the user accepts or aborts.
    pub async fn run(&mut self) -> Result<()> {
        trace!("starting event loop");
        loop {
            if self.tick().await? {
                break Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SelectOptionsBuilder;
    use ratatui::backend::TestBackend;

    fn choices() -> Vec<SelectOption> {
        vec![SelectOption::new("Alpha", "a"), SelectOption::new("Beta", "b")]
    }

    #[test]
    fn select_1_skips_the_terminal() {
        let opts = SelectOptionsBuilder::default().select_1(true).build().unwrap();
        let out = Dropsel::run_with(opts, vec![SelectOption::new("Only", "o")]).unwrap();
        assert_eq!(out.value.as_deref(), Some("o"));
        assert_eq!(out.label.as_deref(), Some("Only"));
        assert!(!out.is_abort);
    }

    #[test]
    fn exit_0_skips_the_terminal() {
        let opts = SelectOptionsBuilder::default().exit_0(true).build().unwrap();
        let out = Dropsel::run_with(opts, Vec::new()).unwrap();
        assert_eq!(out.value, None);
        assert!(!out.is_abort);
    }

    #[test]
    fn bad_height_is_an_error() {
        let opts = SelectOptionsBuilder::default()
            .height(String::from("120%"))
            .build()
            .unwrap();
        assert!(Dropsel::<TestBackend>::init(opts, choices()).is_err());
    }

    #[tokio::test]
    async fn abort_keeps_value() {
        let opts = SelectOptionsBuilder::default()
            .value(Some(String::from("b")))
            .build()
            .unwrap();
        let mut dropsel = Dropsel::<TestBackend>::init(opts, choices()).unwrap();
        let tui = Tui::with_viewport(TestBackend::new(20, 6), ratatui::Viewport::Fullscreen).unwrap();
        dropsel.init_tui_with(tui);
        dropsel
            .tui_mut()
            .event_tx
            .send(Event::Action(Action::Abort))
            .unwrap();
        assert!(dropsel.tick().await.unwrap());
        let out = dropsel.output();
        assert!(out.is_abort);
        assert_eq!(out.value.as_deref(), Some("b"));
        assert_eq!(out.label.as_deref(), Some("Beta"));
    }
}
