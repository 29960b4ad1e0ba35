//! Cross-language ORM call-chain normalization and N+1 query detection
//! (spec §4.8's boundary/data-access cousin: same ORM surface, different
//! question — "is this query inside a loop" rather than "what table").

pub mod framework_matchers;
pub mod n_plus_one;
pub mod normalizers;
pub mod types;

pub use framework_matchers::{MatcherRegistry, QueryPattern};
pub use n_plus_one::{detect_n_plus_one, NPlusOneDetection, NPlusOneType};
pub use normalizers::{create_all_normalizers, normalizer_for, LanguageNormalizer};
pub use types::{CallArg, ChainCall, DataOperation, UnifiedCallChain};
