//! Display formatting for terminal output
//!
//! Plain-text tables for sets and cards, and the study view frame.

pub mod set;
pub mod study;

pub use set::{format_card_list, format_set_details, format_set_list};
pub use study::{format_study_view, STUDY_HELP};
