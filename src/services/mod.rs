pub mod evaluator;
pub mod progress;

pub use evaluator::Evaluator;
pub use progress::{LogProgress, Watchdog};
