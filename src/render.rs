use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

use crate::gym::{Grid, Pos};

/// A snapshot of an observed episode, taken before each step
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub agent: Pos,
    pub episode: u32,
    pub step: u64,
    pub score: i64,
}

impl Frame<'_> {
    /// Glyph shown at a position, the agent drawn over its cell
    pub fn glyph(&self, pos: Pos) -> char {
        if pos == self.agent {
            'A'
        } else {
            self.grid[pos].glyph()
        }
    }
}

/// Receives the frames of an observed episode
pub trait FrameSink {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// Draws frames as plain text, one cell per character followed by `|`
pub struct TextSink<W: Write> {
    out: W,
    clear: bool,
}

impl<W: Write> TextSink<W> {
    /// Sink that clears the screen before each frame
    pub fn new(out: W) -> Self {
        Self { out, clear: true }
    }

    /// Sink that appends frames without clearing
    pub fn plain(out: W) -> Self {
        Self { out, clear: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TextSink<W> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        if self.clear {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        for y in 0..frame.grid.height() {
            let line: String = (0..frame.grid.width())
                .flat_map(|x| [frame.glyph((x, y)), '|'])
                .collect();
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "Step: {}", frame.step)?;
        self.out.flush()
    }
}

/// Wraps a sink and sleeps after every frame so a person can follow along
pub struct Paced<S> {
    inner: S,
    delay: Duration,
}

impl<S: FrameSink> Paced<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<S: FrameSink> FrameSink for Paced<S> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.inner.render(frame)?;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn text_frame() {
        let grid: Grid = "4,0,1\n3,0,2".parse().unwrap();
        let mut sink = TextSink::plain(Vec::new());
        sink.render(&Frame {
            grid: &grid,
            agent: (1, 0),
            episode: 0,
            step: 3,
            score: 0,
        })
        .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "I|A|X|\nB| |O|\nStep: 3\n");
    }

    #[test]
    fn clearing_sink_emits_escape() {
        let grid: Grid = "4,2".parse().unwrap();
        let mut sink = TextSink::new(Vec::new());
        sink.render(&Frame {
            grid: &grid,
            agent: (0, 0),
            episode: 0,
            step: 0,
            score: 0,
        })
        .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.starts_with('\u{1b}'));
        assert!(text.ends_with("A|O|\nStep: 0\n"));
    }

    #[test]
    fn paced_sink_waits() {
        let grid: Grid = "4,2".parse().unwrap();
        let frame = Frame {
            grid: &grid,
            agent: (0, 0),
            episode: 0,
            step: 0,
            score: 0,
        };
        let mut sink = Paced::new(TextSink::plain(io::sink()), Duration::from_millis(20));

        let start = Instant::now();
        sink.render(&frame).unwrap();
        sink.render(&frame).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
