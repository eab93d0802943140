use std::time::Duration;

pub const PROGRESS_BAR_WIDTH: usize = 30;
pub const TICK_INTERVAL: Duration = Duration::from_millis(75);
