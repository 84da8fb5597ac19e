pub mod game_metrics;
pub mod high_score;
pub mod training_stats;

pub use game_metrics::GameMetrics;
pub use high_score::{HighScoreStore, DEFAULT_HIGH_SCORE_FILE};
pub use training_stats::TrainingStats;
