//! Presentation helpers shared by the generator and templates

mod date;
mod reading;

pub use date::{format_published, time_tag};
pub use reading::{count_words, reading_minutes};
