//! Fast non-cryptographic-hash collection aliases used throughout hot
//! paths (scanner, detection, call graph, pattern aggregation).

pub type FxHashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;
pub type FxHashSet<T> = std::collections::HashSet<T, rustc_hash::FxBuildHasher>;

/// Small-vector alias for hot-path collections that are usually 0..4 elements
/// (call-site argument lists, per-file location lists before aggregation).
pub type SmallVec4<T> = smallvec::SmallVec<[T; 4]>;
