//! One `GASTNormalizer` override per language.

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

pub use csharp::CSharpNormalizer;
pub use go::GoNormalizer;
pub use java::JavaNormalizer;
pub use javascript::JavaScriptNormalizer;
pub use kotlin::KotlinNormalizer;
pub use php::PhpNormalizer;
pub use python::PythonNormalizer;
pub use ruby::RubyNormalizer;
pub use rust_lang::RustNormalizer;
pub use typescript::TypeScriptNormalizer;
