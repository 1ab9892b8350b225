//! qgrid - train a Q-learning agent on a grid map and report its last episode

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use qgrid::{
    algo::{EpisodeSummary, QTableAgent},
    config::Config,
    gym::GridWorld,
    history::History,
    render::{FrameSink, Paced, TextSink},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qgrid", version, about = "Train a tabular Q-learning agent on a grid map")]
struct Cli {
    /// Map file: lines of comma separated cells (0 empty, 1 trap, 2 objective, 3 bonus, 4 start)
    #[arg(env = "QGRID_MAP")]
    map: Option<PathBuf>,

    /// TOML config file, overridden by the options below
    #[arg(short, long, env = "QGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Probability of taking the greedy action
    #[arg(long)]
    epsilon: Option<f64>,

    /// Learning rate
    #[arg(long)]
    alpha: Option<f64>,

    /// Discount factor
    #[arg(long)]
    gamma: Option<f64>,

    /// Number of training episodes
    #[arg(long)]
    episodes: Option<u32>,

    /// Step limit per episode, 0 for none
    #[arg(long)]
    max_steps: Option<u64>,

    /// Seed for reproducible runs
    #[arg(long, env = "QGRID_SEED")]
    seed: Option<u64>,

    /// Draw the last episode
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    visualize: Option<bool>,

    /// Pause between drawn steps in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Write score and steps of every episode to this CSV file
    #[arg(long)]
    history: Option<PathBuf>,

    /// Show training in a terminal UI
    #[cfg(feature = "viz")]
    #[arg(long)]
    tui: bool,
}

impl Cli {
    /// Overwrite config values given on the command line
    fn apply(&self, config: &mut Config) {
        if let Some(map) = &self.map {
            config.map = map.clone();
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(visualize) = self.visualize {
            config.visualize = visualize;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
    }

    #[cfg(feature = "viz")]
    fn tui(&self) -> bool {
        self.tui
    }

    #[cfg(not(feature = "viz"))]
    fn tui(&self) -> bool {
        false
    }
}

fn init_logging(tui: bool) -> Result<()> {
    #[cfg(feature = "viz")]
    if tui {
        tui_logger::init_logger(log::LevelFilter::Trace).context("failed to install logger")?;
        tui_logger::set_default_level(log::LevelFilter::Debug);
        return Ok(());
    }
    #[cfg(not(feature = "viz"))]
    let _ = tui;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.tui())?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);
    let agent_config = config.agent_config().context("invalid configuration")?;

    let mut env = GridWorld::load(&config.map)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");
    let mut agent = QTableAgent::seeded(agent_config, &env, seed)?;

    #[cfg(feature = "viz")]
    let viewer = cli.tui().then(|| qgrid::viz::init(config.episodes));

    let mut sink: Option<Box<dyn FrameSink>> = None;
    #[cfg(feature = "viz")]
    if let Some((_, tx)) = &viewer {
        let tui = qgrid::viz::TuiSink::new(tx.clone());
        sink = Some(Box::new(Paced::new(tui, config.delay())));
    }
    if sink.is_none() && config.visualize {
        let text = TextSink::new(io::stdout());
        sink = Some(Box::new(Paced::new(text, config.delay())));
    }

    let mut summaries: Vec<EpisodeSummary> = Vec::new();
    let keep_history = cli.history.is_some();
    let result = agent.train(
        &mut env,
        config.episodes,
        sink.as_deref_mut(),
        |_episode, summary| {
            #[cfg(feature = "viz")]
            if let Some((_, tx)) = &viewer {
                let _ = tx.send(qgrid::viz::Update::Episode {
                    episode: _episode,
                    summary: *summary,
                });
            }
            if keep_history {
                summaries.push(*summary);
            }
        },
    );
    drop(sink);

    #[cfg(feature = "viz")]
    if let Some((handle, tx)) = viewer {
        if result.is_ok() {
            let _ = tx.send(qgrid::viz::Update::Done);
        }
        drop(tx);
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("viewer thread panicked"))?
            .context("viewer failed")?;
    }

    if let Some(path) = &cli.history {
        let mut history = History::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        for (episode, summary) in (0..).zip(&summaries) {
            history.record(episode, summary)?;
        }
        history.finish()?;
        log::info!("wrote {} episodes to {}", summaries.len(), path.display());
    }

    let last = result.context("training failed")?;

    log::debug!(
        "start values (up, down, right, left): {:?}",
        agent.get_q_table().values(env.origin())
    );
    let limit = env.width() * env.height() * 4;
    let path = agent.greedy_path(&env, limit);
    if agent.solves(&env, limit) {
        log::info!("greedy route reaches the objective in {} steps", path.len() - 1);
    } else {
        log::warn!("greedy route does not reach the objective");
    }

    println!("Last episode data:");
    println!("Score: {}", last.score);
    println!("Steps: {}", last.steps);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn visualize_flag_leaves_the_map_alone() {
        let cli = Cli::try_parse_from(["qgrid", "--visualize", "maps/maze.csv"]).unwrap();
        assert_eq!(cli.visualize, Some(true));
        assert_eq!(cli.map, Some(PathBuf::from("maps/maze.csv")));

        let cli = Cli::try_parse_from(["qgrid", "maps/maze.csv", "--visualize=false"]).unwrap();
        assert_eq!(cli.visualize, Some(false));

        let cli = Cli::try_parse_from(["qgrid", "--seed", "4"]).unwrap();
        assert_eq!(cli.visualize, None);
    }

    #[test]
    fn command_line_overrides_config() {
        let cli = Cli::try_parse_from(["qgrid", "m.csv", "--alpha", "0.5", "--visualize=false"])
            .unwrap();
        let mut config = Config {
            gamma: 0.8,
            ..Default::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.map, PathBuf::from("m.csv"));
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.gamma, 0.8);
        assert!(!config.visualize);
    }
}
