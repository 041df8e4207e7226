#![doc = include_str!("../README.md")]
mod notation;
mod settings;

pub use notation::compress;
pub use notation::count_elements;
pub use notation::expand_to_ints;
pub use notation::expand_to_numeral_strings;
pub use notation::join;
pub use notation::NotationError;
pub use settings::Settings;
pub use settings::SettingsError;
