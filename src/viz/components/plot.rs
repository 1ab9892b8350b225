use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, style::Stylize, widgets::*};

use crate::{algo::EpisodeSummary, viz::terminal::pressed_key};

use super::Component;

pub struct Plot {
    pub x_title: String,
    pub y_title: String,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_labels: Vec<String>,
    y_labels: Vec<String>,
    data: Vec<(f64, f64)>,
}

impl Plot {
    pub fn new(y_label: &str) -> Self {
        Self {
            x_title: String::from("Episode"),
            y_title: String::from(y_label),
            x_bounds: [f64::MAX, f64::MIN],
            y_bounds: [f64::MAX, f64::MIN],
            x_labels: Vec::new(),
            y_labels: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Provide initial x bounds
    pub fn with_x_bounds(mut self, x_bounds: [f64; 2]) -> Self {
        self.x_bounds = x_bounds;
        self.x_labels = labels(&self.x_bounds);
        self
    }

    pub fn update(&mut self, point: (f64, f64)) {
        let (x, y) = point;
        if x < self.x_bounds[0] || x > self.x_bounds[1] {
            self.x_bounds = [self.x_bounds[0].min(x), self.x_bounds[1].max(x)];
            self.x_labels = labels(&self.x_bounds);
        }
        if y < self.y_bounds[0] || y > self.y_bounds[1] {
            self.y_bounds = [self.y_bounds[0].min(y), self.y_bounds[1].max(y)];
            self.y_labels = labels(&self.y_bounds);
        }

        self.data.push(point);
    }
}

fn labels(bounds: &[f64; 2]) -> Vec<String> {
    bounds.iter().map(|x| format!("{x:.0}")).collect()
}

impl Widget for &Plot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .cyan()
            .data(&self.data);

        let x_axis = Axis::default()
            .title(self.x_title.as_str())
            .dark_gray()
            .labels(self.x_labels.iter().map(|l| l.clone().bold()).collect())
            .bounds(self.x_bounds);

        let y_axis = Axis::default()
            .title(self.y_title.as_str())
            .dark_gray()
            .labels(self.y_labels.iter().map(|l| l.clone().bold()).collect())
            .bounds(self.y_bounds);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Plots")
            .padding(Padding::uniform(4));

        Chart::new(vec![dataset])
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

/// One plot per episode metric, one shown at a time
pub struct Plots {
    plot_names: Vec<&'static str>,
    plots: Vec<Plot>,
    selected: usize,
}

impl Plots {
    pub fn new(names: Vec<&'static str>, episodes: u32) -> Self {
        let plots = names
            .iter()
            .map(|k| Plot::new(k).with_x_bounds([1.0, episodes.into()]))
            .collect();
        Self {
            plot_names: names,
            plots,
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.plot_names.len()
    }

    pub fn next_plot(&mut self) {
        self.selected = (self.selected + 1) % self.len()
    }

    pub fn prev_plot(&mut self) {
        let len = self.len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Add the metrics of an episode, in the order score then steps
    pub fn update(&mut self, episode: u32, summary: &EpisodeSummary) {
        let x = f64::from(episode + 1);
        let metrics = [summary.score as f64, summary.steps as f64];
        for (plot, metric) in self.plots.iter_mut().zip(metrics) {
            plot.update((x, metric));
        }
    }
}

impl WidgetRef for Plots {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        Tabs::new(self.plot_names.iter().copied())
            .block(Block::default().padding(Padding::uniform(2)))
            .white()
            .highlight_style(Style::default().light_green())
            .select(self.selected)
            .render(area, buf);

        if let Some(plot) = self.plots.get(self.selected) {
            plot.render(area, buf);
        }
    }
}

impl Component for Plots {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match pressed_key(event) {
            Some(KeyCode::Left) => self.prev_plot(),
            Some(KeyCode::Right) => self.next_plot(),
            _ => return false,
        }
        true
    }
}
