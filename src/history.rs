use std::{fs::File, io, path::Path};

use serde::Serialize;

use crate::algo::EpisodeSummary;

#[derive(Serialize)]
struct Record {
    episode: u32,
    score: i64,
    steps: u64,
}

/// Writes one CSV row per training episode
pub struct History<W: io::Write> {
    wtr: csv::Writer<W>,
}

impl History<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, csv::Error> {
        Ok(Self {
            wtr: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: io::Write> History<W> {
    pub fn new(out: W) -> Self {
        Self {
            wtr: csv::Writer::from_writer(out),
        }
    }

    /// Append the summary of an episode, numbered from 1
    pub fn record(&mut self, episode: u32, summary: &EpisodeSummary) -> Result<(), csv::Error> {
        self.wtr.serialize(Record {
            episode: episode + 1,
            score: summary.score,
            steps: summary.steps,
        })
    }

    pub fn finish(mut self) -> Result<W, csv::Error> {
        self.wtr.flush()?;
        self.wtr
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let mut history = History::new(Vec::new());
        history
            .record(0, &EpisodeSummary { score: -99, steps: 12 })
            .unwrap();
        history
            .record(1, &EpisodeSummary { score: 101, steps: 4 })
            .unwrap();

        let out = String::from_utf8(history.finish().unwrap()).unwrap();
        assert_eq!(out, "episode,score,steps\n1,-99,12\n2,101,4\n");
    }
}
