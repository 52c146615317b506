// Posting-time advice — static per-platform tables and a slot recommender.

pub mod recommend;
pub mod tables;
