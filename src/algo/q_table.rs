use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use strum::VariantArray;

use crate::{
    assert_interval,
    decay::Schedule,
    ds::QTable,
    error::{AllocationError, TrainError},
    exploration::{Choice, EpsilonGreedy},
    gym::{Action, CellKind, GridWorld, Pos},
    render::{Frame, FrameSink},
};

use super::Exp;

/// Configuration for the [`QTableAgent`]
#[derive(Debug, Clone)]
pub struct QTableAgentConfig {
    /// Probability of taking the greedy action, possibly varying over episodes
    ///
    /// **Default**: constant `0.9`
    pub exploration: EpsilonGreedy<Schedule>,
    /// Learning rate
    ///
    /// **Default**: `0.1`
    pub alpha: f64,
    /// Discount factor
    ///
    /// **Default**: `0.9`
    pub gamma: f64,
    /// Steps after which an episode is abandoned, `None` to run until the objective
    ///
    /// **Default**: `Some(1_000_000)`
    pub max_steps: Option<u64>,
}

impl Default for QTableAgentConfig {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(Schedule::default()),
            alpha: 0.1,
            gamma: 0.9,
            max_steps: Some(1_000_000),
        }
    }
}

/// Outcome of one episode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeSummary {
    /// Sum of the rewards collected
    pub score: i64,
    /// Number of actions taken
    pub steps: u64,
}

/// A Q-learning agent that keeps one value per cell and action of a [`GridWorld`]
///
/// The table persists across episodes. All randomness comes from `rng`, so a seeded
/// generator makes training reproducible.
pub struct QTableAgent<R: Rng = StdRng> {
    q_table: QTable,
    exploration: EpsilonGreedy<Schedule>,
    alpha: f64,   // learning rate
    gamma: f64,   // discount factor
    max_steps: Option<u64>,
    episode: u32, // current episode
    rng: R,
}

impl QTableAgent<StdRng> {
    /// Initialize an agent for `env` with a generator seeded from `seed`
    pub fn seeded(
        config: QTableAgentConfig,
        env: &GridWorld,
        seed: u64,
    ) -> Result<Self, AllocationError> {
        Self::new(config, env, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QTableAgent<R> {
    /// Initialize a new agent with a zeroed table sized for `env`
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(config: QTableAgentConfig, env: &GridWorld, rng: R) -> Result<Self, AllocationError> {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        Ok(Self {
            q_table: QTable::new(env.width(), env.height(), Action::COUNT)?,
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            max_steps: config.max_steps,
            episode: 0,
            rng,
        })
    }

    pub fn get_q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Number of episodes run so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Choose an action in `state`
    ///
    /// States whose best value is exactly zero have taught the agent nothing yet and are
    /// always explored.
    fn act(&mut self, state: Pos) -> Action {
        let choice = self.exploration.choose(self.episode, &mut self.rng);
        if self.q_table.best_value(state) == 0.0 || choice == Choice::Explore {
            Action::VARIANTS[self.rng.gen_range(0..Action::COUNT)]
        } else {
            Action::VARIANTS[self.q_table.best_action(state)]
        }
    }

    fn learn(&mut self, experience: Exp) {
        let Exp {
            state,
            action,
            next_state,
            reward,
        } = experience;

        let predicted = self.q_table.get(state, action.index());
        let target = match next_state {
            Some(next) => reward + self.gamma * self.q_table.best_value(next),
            None => reward,
        };
        self.q_table.set(
            state,
            action.index(),
            predicted + self.alpha * (target - predicted),
        );
    }

    /// Run one episode, from the start cell until the agent stands on the objective
    ///
    /// When a `sink` is given it receives a frame before every step and one on arrival.
    pub fn go(
        &mut self,
        env: &mut GridWorld,
        mut sink: Option<&mut (dyn FrameSink + '_)>,
    ) -> Result<EpisodeSummary, TrainError> {
        let episode = self.episode;
        self.episode += 1;

        let start = env.reset();
        let mut summary = EpisodeSummary::default();
        let mut next_state = env.is_active().then_some(start);

        while let Some(state) = next_state {
            if self.max_steps.is_some_and(|max| summary.steps >= max) {
                return Err(TrainError::DidNotConverge {
                    episode,
                    steps: summary.steps,
                });
            }
            if let Some(sink) = sink.as_mut() {
                sink.render(&frame(env, episode, &summary))?;
            }

            let action = self.act(state);
            let (next, reward) = env.step(action);
            log::trace!("{state:?} --{action:?}--> {:?}, reward {reward}", env.pos());

            self.learn(Exp {
                state,
                action,
                next_state: next,
                reward: reward as f64,
            });
            summary.score += reward;
            summary.steps += 1;
            next_state = next;
        }

        if let Some(sink) = sink.as_mut() {
            sink.render(&frame(env, episode, &summary))?;
        }

        log::debug!(
            "episode {}: score {}, steps {}",
            episode + 1,
            summary.score,
            summary.steps
        );
        Ok(summary)
    }

    /// Run `episodes` episodes, showing only the last one to `sink`
    ///
    /// `observe` is called after every episode with its index and summary.
    ///
    /// **Returns** the summary of the last episode
    ///
    /// **Panics** if `episodes` is zero
    pub fn train(
        &mut self,
        env: &mut GridWorld,
        episodes: u32,
        sink: Option<&mut (dyn FrameSink + '_)>,
        mut observe: impl FnMut(u32, &EpisodeSummary),
    ) -> Result<EpisodeSummary, TrainError> {
        assert!(episodes > 0, "training needs at least one episode");
        log::info!(
            "training on {}x{} map for {episodes} episodes",
            env.width(),
            env.height()
        );

        for i in 0..episodes - 1 {
            let summary = self.go(env, None)?;
            observe(i, &summary);
        }
        let last = self.go(env, sink)?;
        observe(episodes - 1, &last);

        log::info!(
            "finished training: last episode scored {} in {} steps",
            last.score,
            last.steps
        );
        Ok(last)
    }

    /// Follow the greedy action from the start cell without learning
    ///
    /// Stops on the objective or after `limit` steps.
    ///
    /// **Returns** every visited position, starting with the start cell
    pub fn greedy_path(&self, env: &GridWorld, limit: usize) -> Vec<Pos> {
        let mut env = env.clone();
        let mut path = vec![env.reset()];
        while env.is_active() && path.len() <= limit {
            let action = Action::VARIANTS[self.q_table.best_action(env.pos())];
            env.step(action);
            path.push(env.pos());
        }
        path
    }

    /// Whether the greedy path from the start cell reaches the objective within `limit` steps
    pub fn solves(&self, env: &GridWorld, limit: usize) -> bool {
        self.greedy_path(env, limit)
            .last()
            .is_some_and(|&pos| env.original()[pos] == CellKind::Objective)
    }
}

fn frame<'a>(env: &'a GridWorld, episode: u32, summary: &EpisodeSummary) -> Frame<'a> {
    Frame {
        grid: env.grid(),
        agent: env.pos(),
        episode,
        step: summary.steps,
        score: summary.score,
    }
}
