//! Maps a normalized call chain's method name to the ORM framework and
//! `DataOperation` it most likely belongs to.

use super::types::{DataOperation, UnifiedCallChain};

/// A single method-name → (framework, operation) mapping.
pub struct QueryPattern {
    pub framework: String,
    pub operation: DataOperation,
}

/// Registry of method-name patterns across the 8 ORMs `n_plus_one`
/// supports plus a catch-all raw-query bucket.
pub struct MatcherRegistry {
    entries: Vec<(&'static str, QueryPattern)>,
}

impl MatcherRegistry {
    pub fn new() -> Self {
        let mut entries = Vec::new();
        let mut add = |method: &'static str, framework: &str, op: DataOperation| {
            entries.push((
                method,
                QueryPattern {
                    framework: framework.to_string(),
                    operation: op,
                },
            ));
        };

        // Reads
        for (method, framework) in [
            ("find", "active_record"), ("find_by", "active_record"), ("where", "active_record"),
            ("first", "active_record"), ("last", "active_record"), ("find_each", "active_record"),
            ("get", "django"), ("filter", "django"), ("exclude", "django"), ("all", "django"),
            ("query", "sqlalchemy"), ("filter_by", "sqlalchemy"), ("one", "sqlalchemy"),
            ("load", "hibernate"), ("createQuery", "hibernate"),
            ("Find", "ef_core"), ("FindAsync", "ef_core"), ("FirstOrDefault", "ef_core"), ("Where", "ef_core"), ("Single", "ef_core"),
            ("findUnique", "prisma"), ("findFirst", "prisma"), ("findMany", "prisma"),
            ("findOne", "sequelize"), ("findAll", "sequelize"), ("findByPk", "sequelize"), ("findAndCountAll", "sequelize"),
            ("findOneBy", "typeorm"), ("findBy", "typeorm"), ("createQueryBuilder", "typeorm"),
        ] {
            add(method, framework, DataOperation::Select);
        }

        // Writes
        for (method, framework, op) in [
            ("save", "active_record", DataOperation::Insert),
            ("create", "active_record", DataOperation::Insert),
            ("update", "active_record", DataOperation::Update),
            ("destroy", "active_record", DataOperation::Delete),
            ("create", "prisma", DataOperation::Insert),
            ("update", "prisma", DataOperation::Update),
            ("delete", "prisma", DataOperation::Delete),
            ("create", "sequelize", DataOperation::Insert),
            ("destroy", "sequelize", DataOperation::Delete),
        ] {
            add(method, framework, op);
        }

        // Raw queries
        for method in ["createNativeQuery", "raw", "exec", "rawQuery", "executeSql"] {
            add(method, "raw", DataOperation::RawQuery);
        }

        Self { entries }
    }

    /// Match the first call in `chain` whose method is recognized.
    pub fn match_chain(&self, chain: &UnifiedCallChain) -> Option<&QueryPattern> {
        chain.calls.iter().find_map(|call| {
            self.entries
                .iter()
                .find(|(method, _)| *method == call.method)
                .map(|(_, pattern)| pattern)
        })
    }

    /// Look up a single call-site's method name directly, without a full
    /// normalized chain. Used by the boundary analyzer to classify a
    /// `CallSite`'s operation against the framework the enclosing model was
    /// already detected under.
    pub fn match_method(&self, method: &str) -> Option<&QueryPattern> {
        self.entries.iter().find(|(m, _)| *m == method).map(|(_, pattern)| pattern)
    }
}

impl Default for MatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}
