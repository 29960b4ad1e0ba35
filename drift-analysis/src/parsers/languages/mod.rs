//! One `LanguageParser` impl per grammar, all sharing the extraction walk
//! in `common`.

mod common;

pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod kotlin;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust_lang;
pub mod typescript;

pub use common::{parse_with_language, parse_with_language_and_tree};
