// Tone-of-voice linting — blocked-phrase rules plus writing-style heuristics.

pub mod heuristics;
pub mod rules;
pub mod scorer;
