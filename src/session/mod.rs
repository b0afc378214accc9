//! Study sessions
//!
//! A session copies a source of cards into a shuffled deck and walks a
//! cursor through it, one card at a time, front side first.

pub mod engine;

pub use engine::{Advance, SessionEngine, SessionSnapshot, SessionState, Shuffle};
