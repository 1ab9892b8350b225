use crossterm::event::Event;
use ratatui::{prelude::*, widgets::*};

use crate::{gym::CellKind, viz::Snapshot};

use super::Component;

/// The map with the agent on it, as of the latest frame
#[derive(Default)]
pub struct GridView {
    snapshot: Option<Snapshot>,
}

impl GridView {
    pub fn update(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
    }
}

fn cell_style(kind: CellKind) -> Style {
    match kind {
        CellKind::Empty => Style::default().dark_gray(),
        CellKind::Trap => Style::default().light_red().bold(),
        CellKind::Objective => Style::default().light_green().bold(),
        CellKind::Bonus => Style::default().light_cyan(),
        CellKind::Init => Style::default().blue(),
    }
}

impl WidgetRef for GridView {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::uniform(1));

        let Some(snap) = &self.snapshot else {
            Paragraph::new("Waiting for the last episode...")
                .block(block.title("Grid"))
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        };

        let lines = snap
            .grid
            .rows()
            .enumerate()
            .map(|(y, row)| {
                let spans = row
                    .iter()
                    .enumerate()
                    .map(|(x, &kind)| {
                        if (x, y) == snap.agent {
                            Span::styled("A ", Style::default().yellow().bold())
                        } else if kind == CellKind::Empty {
                            Span::styled(". ", cell_style(kind))
                        } else {
                            Span::styled(format!("{} ", kind.glyph()), cell_style(kind))
                        }
                    })
                    .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect::<Vec<_>>();

        let title = format!(
            "Episode {} · step {} · score {}",
            snap.episode + 1,
            snap.step,
            snap.score
        );
        Paragraph::new(lines)
            .block(block.title(title))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Component for GridView {
    fn handle_ui_event(&mut self, _event: &Event) -> bool {
        false
    }
}
