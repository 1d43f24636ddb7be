pub mod catalog;
pub mod config;
pub mod schedule;
pub mod score;
