#![warn(clippy::pedantic)]

pub mod json_file;
pub mod memory;

const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";
