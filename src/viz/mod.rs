use std::{
    io,
    sync::mpsc::{self, Sender},
    thread::{self, JoinHandle},
};

use crate::{
    algo::EpisodeSummary,
    gym::{Grid, Pos},
    render::{Frame, FrameSink},
};

mod app;
mod components;
mod terminal;

pub use app::App;

/// An owned copy of a [`Frame`] that can cross to the UI thread
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub agent: Pos,
    pub episode: u32,
    pub step: u64,
    pub score: i64,
}

impl From<&Frame<'_>> for Snapshot {
    fn from(frame: &Frame<'_>) -> Self {
        Self {
            grid: frame.grid.clone(),
            agent: frame.agent,
            episode: frame.episode,
            step: frame.step,
            score: frame.score,
        }
    }
}

/// Messages from the training loop to the UI
pub enum Update {
    /// An episode finished
    Episode { episode: u32, summary: EpisodeSummary },
    /// A step of the observed episode
    Frame(Snapshot),
    /// Training is over
    Done,
}

/// Spawn the UI thread
///
/// **Returns** the thread handle and the sender for training updates
pub fn init(episodes: u32) -> (JoinHandle<io::Result<()>>, Sender<Update>) {
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(episodes);
    let handle = thread::spawn(move || app.run(rx));
    (handle, tx)
}

/// Forwards frames to the UI thread
///
/// Frames sent after the UI was closed are dropped.
pub struct TuiSink {
    tx: Sender<Update>,
}

impl TuiSink {
    pub fn new(tx: Sender<Update>) -> Self {
        Self { tx }
    }
}

impl FrameSink for TuiSink {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        if self.tx.send(Update::Frame(frame.into())).is_err() {
            log::debug!("viewer closed, dropping frame {}", frame.step);
        }
        Ok(())
    }
}
