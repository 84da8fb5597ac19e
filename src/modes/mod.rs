pub mod baseline;
pub mod console;
pub mod human;
pub mod play;
pub mod train;
pub mod visualize;

pub use baseline::BaselineMode;
pub use console::ConsoleMode;
pub use human::HumanMode;
pub use play::{PlayMode, PlaybackOutcome};
pub use train::{EpisodeOutcome, TrainConfig, TrainMode};
pub use visualize::{VisualizationSpeed, VisualizeMode};
