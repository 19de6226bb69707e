pub mod orchestration;

pub use orchestration::{run_bump, show_status, BumpOutcome, RunOptions};
