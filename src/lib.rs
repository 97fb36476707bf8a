//! Punch-clock for tracking working hours through a plain-text journal.
//! `arrive` and `leave` mark session boundaries, a small background tracker
//! rides out hibernation and crashes, and `daily`/`weekly` fold the journal
//! into per-day and per-ISO-week totals.

pub mod cli;
pub mod daemon;
pub mod i18n;
pub mod journal;
pub mod utils;
