//! `WeightProvider` — bridges the legacy weighted-sum confidence formula
//! to the Beta-posterior target model during the transition window.
//!
//! The target model (see `drift-analysis::patterns::confidence`) is a
//! Beta(1+k, 1+n-k) posterior. Projects bootstrapping from pre-Beta data
//! have only a legacy composite score in [0,1]; `WeightProvider` maps
//! that legacy score to a seed (alpha, beta) pair so the transition is
//! explicit and auditable rather than an implicit one-time migration.

/// A historical confidence transition strategy, recorded alongside the
/// migrated pattern so the mapping used can be audited later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPath {
    /// No legacy data existed; pattern starts from the uninformative prior.
    Fresh,
    /// Legacy composite score seeded (alpha, beta) via `StaticWeightProvider`.
    SeededFromLegacy,
    /// Operator supplied an explicit (alpha, beta) override.
    ManualOverride,
}

/// Maps legacy signals to a seed (alpha, beta) pair for the Beta posterior.
pub trait WeightProvider: Send + Sync {
    /// Given a legacy composite score in `[0,1]` and the number of trials
    /// it was computed over, return a seed `(alpha, beta)` with both
    /// values clamped to `>= 1.0`.
    fn seed(&self, legacy_score: f64, trials: u32) -> (f64, f64);

    /// Which migration path this provider represents, for bookkeeping.
    fn migration_path(&self) -> MigrationPath;
}

/// Fixed-weight legacy bootstrap: treats `legacy_score * trials` as
/// conforming observations out of `trials`, same shape as a direct
/// Beta(1+k, 1+n-k) seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticWeightProvider;

impl WeightProvider for StaticWeightProvider {
    fn seed(&self, legacy_score: f64, trials: u32) -> (f64, f64) {
        let score = legacy_score.clamp(0.0, 1.0);
        let n = trials.max(1) as f64;
        let k = score * n;
        ((1.0 + k).max(1.0), (1.0 + (n - k)).max(1.0))
    }

    fn migration_path(&self) -> MigrationPath {
        MigrationPath::SeededFromLegacy
    }
}

/// A weight table keyed by pattern category, for projects whose legacy
/// scores carry a per-category bias (e.g. security patterns historically
/// scored more conservatively than styling ones).
#[derive(Debug, Clone, Default)]
pub struct AdaptiveWeightTable {
    category_bias: rustc_hash::FxHashMap<String, f64>,
}

impl AdaptiveWeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bias multiplier (applied to `k` before seeding) for a category.
    pub fn with_bias(mut self, category: impl Into<String>, bias: f64) -> Self {
        self.category_bias.insert(category.into(), bias);
        self
    }

    pub fn seed_for_category(&self, category: &str, legacy_score: f64, trials: u32) -> (f64, f64) {
        let bias = self.category_bias.get(category).copied().unwrap_or(1.0);
        StaticWeightProvider.seed((legacy_score * bias).clamp(0.0, 1.0), trials)
    }
}

impl WeightProvider for AdaptiveWeightTable {
    fn seed(&self, legacy_score: f64, trials: u32) -> (f64, f64) {
        StaticWeightProvider.seed(legacy_score, trials)
    }

    fn migration_path(&self) -> MigrationPath {
        MigrationPath::SeededFromLegacy
    }
}
