use std::{
    io,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use super::{
    components::{render_help, Component, GridView, Logs, Plots},
    terminal::{self, pressed_key},
    Update,
};

const TABS: [&str; 3] = ["Grid", "Plots", "Logs"];

#[derive(Default)]
pub enum State {
    #[default]
    Train,
    Done,
    Error(&'static str),
    Quit,
}

/// The root TUI component which holds the main app state and runs the render loop
pub struct App {
    state: State,
    episode: u32,
    total_episodes: u32,
    selected_tab: usize,
    show_help: bool,
    grid: GridView,
    plots: Plots,
    logs: Logs,
}

impl App {
    pub fn new(episodes: u32) -> Self {
        Self {
            state: Default::default(),
            episode: 0,
            total_episodes: episodes,
            selected_tab: 0,
            show_help: false,
            grid: GridView::default(),
            plots: Plots::new(vec!["Score", "Steps"], episodes),
            logs: Logs::new(),
        }
    }

    /// Initialize the terminal and run the main loop until the user quits
    ///
    /// Restores the terminal on exit
    pub fn run(&mut self, rx: Receiver<Update>) -> io::Result<()> {
        let mut tui = terminal::enter()?;

        while !matches!(self.state, State::Quit) {
            if matches!(self.state, State::Train) {
                self.drain(&rx);
            }

            tui.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }

        terminal::leave()
    }

    fn drain(&mut self, rx: &Receiver<Update>) {
        loop {
            match rx.try_recv() {
                Ok(Update::Episode { episode, summary }) => {
                    self.episode = episode + 1;
                    self.plots.update(episode, &summary);
                }
                Ok(Update::Frame(snapshot)) => self.grid.update(snapshot),
                Ok(Update::Done) => {
                    self.state = State::Done;
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.state = State::Error("Training stopped early");
                    break;
                }
            }
        }
    }

    fn handle_event(&mut self, event: &Event) {
        match pressed_key(event) {
            Some(KeyCode::Char('q')) => self.state = State::Quit,
            Some(KeyCode::Char('h')) => self.show_help = !self.show_help,
            Some(KeyCode::Tab) => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {
                match self.selected_tab {
                    0 => self.grid.handle_ui_event(event),
                    1 => self.plots.handle_ui_event(event),
                    2 => self.logs.handle_ui_event(event),
                    _ => false,
                };
            }
        }
    }

    fn status(&self) -> String {
        match self.state {
            State::Train => String::from("Training"),
            State::Done => String::from("Done, press q to exit"),
            State::Error(msg) => format!("{msg}, press q to exit"),
            State::Quit => String::new(),
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Layout
        let [menu_area, main_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        // Menu
        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        // Main
        match self.selected_tab {
            0 => self.grid.render_ref(main_area, buf),
            1 => self.plots.render_ref(main_area, buf),
            2 => self.logs.render_ref(main_area, buf),
            _ => {}
        }

        // Progress Bar
        Gauge::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(format!("Progress · {}", self.status())),
            )
            .gauge_style(Color::Cyan)
            .label(format!("{}/{}", self.episode, self.total_episodes))
            .ratio(self.episode as f64 / self.total_episodes.max(1) as f64)
            .render(progress_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}
