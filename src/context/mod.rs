pub mod language;

pub use language::{Language, LanguageContext};
