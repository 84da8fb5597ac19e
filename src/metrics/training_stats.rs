//! Training statistics tracking for Q-learning
//!
//! Tracks episode rewards, lengths and foods eaten, plus the size of TD
//! errors seen by the learner.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// Keeps rolling windows for smoothed progress reports and running totals
/// for whole-run averages.
///
/// # Example
///
/// ```rust
/// use q_snake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
///
/// // Record an episode
/// stats.record_episode(1.3, 42, 2);
///
/// // Record a learner update
/// stats.record_td_error(-0.25);
///
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f64>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Foods eaten per episode (rolling window)
    episode_foods: VecDeque<u32>,

    /// Absolute TD errors (rolling window)
    td_errors: VecDeque<f64>,

    total_episodes: usize,
    total_steps: usize,
    total_reward: f64,
    total_foods: u64,

    /// Best single-episode food count
    best_foods: u32,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// `window_size` is the number of recent values kept for rolling averages.
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_foods: VecDeque::with_capacity(window_size),
            td_errors: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            total_reward: 0.0,
            total_foods: 0,
            best_foods: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// # Arguments
    ///
    /// * `reward` - Total (possibly shaped) reward accumulated during the episode
    /// * `length` - Number of steps taken in the episode
    /// * `foods` - Number of foods eaten
    pub fn record_episode(&mut self, reward: f64, length: usize, foods: u32) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_foods, foods, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        self.total_reward += reward;
        self.total_foods += u64::from(foods);
        self.best_foods = self.best_foods.max(foods);
    }

    /// Record the TD error of one learner update
    pub fn record_td_error(&mut self, td_error: f64) {
        Self::push_deque(&mut self.td_errors, td_error.abs(), self.window_size);
    }

    /// Mean episode reward over the rolling window, 0.0 if empty
    pub fn mean_episode_reward(&self) -> f64 {
        Self::mean(self.episode_rewards.iter().copied())
    }

    /// Mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f64 {
        Self::mean(self.episode_lengths.iter().map(|&l| l as f64))
    }

    /// Mean foods eaten over the rolling window
    pub fn mean_episode_foods(&self) -> f64 {
        Self::mean(self.episode_foods.iter().map(|&f| f64::from(f)))
    }

    /// Mean absolute TD error over the rolling window
    pub fn mean_td_error(&self) -> f64 {
        Self::mean(self.td_errors.iter().copied())
    }

    /// Mean episode reward over every recorded episode
    pub fn overall_mean_reward(&self) -> f64 {
        self.per_episode(self.total_reward)
    }

    /// Mean episode length over every recorded episode
    pub fn overall_mean_length(&self) -> f64 {
        self.per_episode(self.total_steps as f64)
    }

    /// Mean foods eaten over every recorded episode
    pub fn overall_mean_foods(&self) -> f64 {
        self.per_episode(self.total_foods as f64)
    }

    pub fn best_foods(&self) -> u32 {
        self.best_foods
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Get the total number of environment steps taken
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a summary of the rolling statistics
    ///
    /// ```text
    /// Episodes: 1 | Steps: 42 | Reward: 1.30 | Foods: 2.00 | Len: 42.0 | TD: 0.2500
    /// ```
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Foods: {:.2} | Len: {:.1} | TD: {:.4}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_foods(),
            self.mean_episode_length(),
            self.mean_td_error(),
        )
    }

    /// Format whole-run averages
    pub fn format_overall(&self) -> String {
        format!(
            "Average reward: {:.2}\nAverage foods eaten: {:.2}\nAverage steps survived: {:.2}",
            self.overall_mean_reward(),
            self.overall_mean_foods(),
            self.overall_mean_length(),
        )
    }

    fn per_episode(&self, total: f64) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            total / self.total_episodes as f64
        }
    }

    fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
        let len = values.len();
        if len == 0 {
            0.0
        } else {
            values.sum::<f64>() / len as f64
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
