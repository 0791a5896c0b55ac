use clap::Parser;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use dropsel::prelude::*;
use dropsel::tui::Tui;
use ratatui::backend::TestBackend;
use ratatui::style::Style;

/// Drives a [`Dropsel<TestBackend>`] the way the event loop would, one event at a time.
///
/// Initialization goes through [`Dropsel::init`] and [`Dropsel::init_tui_with`] so the
/// production code path is shared. Every processed batch of events is followed by a render,
/// so widget areas are always up to date for the next pointer event.
pub struct TestHarness {
    /// The Dropsel instance backed by a TestBackend
    pub dropsel: Dropsel<TestBackend>,
    /// The event that made the app quit, if it did
    pub final_event: Option<Event>,
}

impl TestHarness {
    /// Process all pending events from the event queue, then render.
    pub fn tick(&mut self) -> Result<()> {
        loop {
            let mut events = Vec::new();
            while let Ok(event) = self.dropsel.tui_mut().event_rx.try_recv() {
                events.push(event);
            }
            if events.is_empty() {
                break;
            }
            for event in events {
                let (app, tui) = self.dropsel.app_and_tui();
                app.handle_event(tui, &event)?;
                if self.dropsel.app().should_quit && self.final_event.is_none() {
                    self.final_event = Some(event);
                }
            }
        }
        self.render()
    }

    /// Queue an event. Call `tick()` to process it.
    pub fn send(&mut self, event: Event) -> Result<()> {
        self.dropsel.tui_mut().event_tx.send(event)?;
        Ok(())
    }

    /// Send a key event and process it immediately.
    pub fn key(&mut self, key: KeyEvent) -> Result<()> {
        self.send(Event::Key(key))?;
        self.tick()
    }

    /// Send a key code without modifiers.
    pub fn code(&mut self, code: KeyCode) -> Result<()> {
        self.key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Type a string, sending each character as a key event.
    pub fn type_str(&mut self, s: &str) -> Result<()> {
        for c in s.chars() {
            self.code(KeyCode::Char(c))?;
        }
        Ok(())
    }

    /// Send an action and process it immediately.
    pub fn action(&mut self, action: Action) -> Result<()> {
        self.send(Event::Action(action))?;
        self.tick()
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Result<()> {
        self.send(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))?;
        self.tick()
    }

    /// Left button down at a cell.
    pub fn press(&mut self, column: u16, row: u16) -> Result<()> {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    /// Left button up at a cell.
    pub fn release(&mut self, column: u16, row: u16) -> Result<()> {
        self.mouse(MouseEventKind::Up(MouseButton::Left), column, row)
    }

    /// Press and release at the same cell.
    pub fn click(&mut self, column: u16, row: u16) -> Result<()> {
        self.press(column, row)?;
        self.release(column, row)
    }

    /// Click the middle of the clear button.
    pub fn click_clear(&mut self) -> Result<()> {
        let area = self.dropsel.app().clear_button.area();
        self.click(area.x + area.width / 2, area.y)
    }

    /// Click the middle of the open button.
    pub fn click_open(&mut self) -> Result<()> {
        let area = self.dropsel.app().open_button.area();
        self.click(area.x + area.width / 2, area.y)
    }

    /// Click into the text field.
    pub fn click_field(&mut self) -> Result<()> {
        let area = self.dropsel.app().field.area();
        self.click(area.x, area.y)
    }

    /// Press the n-th visible row.
    pub fn press_row(&mut self, n: u16) -> Result<()> {
        let area = self.dropsel.app().option_list.area();
        self.press(area.x + 2, area.y + n)
    }

    /// Render the current app state to the terminal buffer.
    pub fn render(&mut self) -> Result<()> {
        let (app, tui) = self.dropsel.app_and_tui();
        tui.draw(|frame| {
            frame.render_widget(&mut *app, frame.area());
        })?;
        Ok(())
    }

    /// Text of one line of the screen, without trailing blanks
    pub fn line(&mut self, y: u16) -> String {
        let buf = self.dropsel.tui_mut().backend().buffer();
        let width = buf.area.width;
        (0..width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    /// Style of one cell of the screen
    pub fn style_at(&mut self, x: u16, y: u16) -> Style {
        self.dropsel.tui_mut().backend().buffer()[(x, y)].style()
    }

    /// The value owned by the app
    pub fn value(&self) -> Option<&str> {
        self.dropsel.app().select.props.value.as_deref()
    }

    /// Text shown in the field
    pub fn field(&self) -> &str {
        self.dropsel.app().field.value()
    }

    /// Whether the widget has focus
    pub fn focused(&self) -> bool {
        self.dropsel.app().select.is_focused()
    }

    /// Labels of the rows in the list
    pub fn rows(&self) -> Vec<&str> {
        self.dropsel
            .app()
            .option_list
            .rows
            .iter()
            .map(|row| row.option.label.as_str())
            .collect()
    }

    /// The exit code the binary would return, once the app quit
    ///
    /// 130 when aborted, 1 when accepted without a value, 0 otherwise.
    pub fn app_exit_code(&self) -> Option<i32> {
        if !self.dropsel.app().should_quit {
            return None;
        }
        let is_abort = self
            .final_event
            .as_ref()
            .map(|event| !matches!(event, Event::Action(Action::Accept)))
            .unwrap_or(true);
        Some(match (is_abort, self.value()) {
            (true, _) => 130,
            (false, None) => 1,
            (false, Some(_)) => 0,
        })
    }
}

/// Initialize a test harness over `choices`, parsed like input lines.
pub fn enter_sized(choices: &[&str], options: SelectOptions, width: u16, height: u16) -> Result<TestHarness> {
    let choices = OptionReader::from_options(&options).of_args(choices)?;
    enter_options(choices, options, width, height)
}

/// Initialize a test harness over already built options.
pub fn enter_options(
    choices: Vec<SelectOption>,
    options: SelectOptions,
    width: u16,
    height: u16,
) -> Result<TestHarness> {
    let tui = Tui::with_viewport(TestBackend::new(width, height), ratatui::Viewport::Fullscreen)?;
    let mut dropsel = Dropsel::<TestBackend>::init(options, choices)?;
    dropsel.init_tui_with(tui);
    let mut harness = TestHarness {
        dropsel,
        final_event: None,
    };
    harness.render()?;
    Ok(harness)
}

/// Initialize a test harness of 30x8 cells.
pub fn enter(choices: &[&str], args: &[&str]) -> Result<TestHarness> {
    enter_sized(choices, parse_options(args), 30, 8)
}

/// Parse SelectOptions from CLI-style arguments.
pub fn parse_options(args: &[&str]) -> SelectOptions {
    let mut full_args = vec!["dropsel"];
    full_args.extend(args);
    SelectOptions::try_parse_from(full_args)
        .expect("Failed to parse options")
        .build()
}
