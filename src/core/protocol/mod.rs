// Protocol module - Wire command encoding
pub mod command;

pub use command::{effect_index, Command, Rgb, EFFECTS};
