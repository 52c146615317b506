// tonecheck: tone-of-voice linting for a social post approval pipeline
//
// This is the library root. Each module corresponds to a subsystem:
// scoring text against the team's voice, advising on posting times, the
// post status workflow, and the rule store behind them.

pub mod config;
pub mod db;
pub mod output;
pub mod schedule;
pub mod status;
pub mod tone;
pub mod workflow;
