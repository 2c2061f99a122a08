//! Terminal display formatting for nfc-pins

pub mod pin;

pub use pin::{format_pin_details, format_pin_list, format_stats};
