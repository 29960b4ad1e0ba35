//! Two-phase learn-then-detect boundary detector.
//!
//! Phase 1 (Learn): Detect frameworks, extract models and fields.
//! Phase 2 (Detect): Identify sensitive fields and data boundaries.

use drift_core::errors::BoundaryError;

use crate::language_provider::framework_matchers::MatcherRegistry;
use crate::language_provider::types::DataOperation;
use crate::parsers::types::{CallSite, ParseResult};

use super::extractors::{self, FieldExtractor};
use super::sensitive::SensitiveFieldDetector;
use super::types::{
    Boundary, BoundaryConfidenceInputs, BoundaryOperation, BoundaryScanResult, ExtractedModel,
    FrameworkSignature, OrmFramework,
};

/// The boundary detector orchestrates framework detection, model extraction,
/// and sensitive field identification.
pub struct BoundaryDetector {
    extractors: Vec<Box<dyn FieldExtractor>>,
    sensitive_detector: SensitiveFieldDetector,
    signatures: Vec<FrameworkSignature>,
    operation_matchers: MatcherRegistry,
}

impl BoundaryDetector {
    /// Create a new boundary detector with all built-in extractors.
    pub fn new() -> Self {
        Self {
            extractors: extractors::create_all_extractors(),
            sensitive_detector: SensitiveFieldDetector::new(),
            signatures: build_framework_signatures(),
            operation_matchers: MatcherRegistry::new(),
        }
    }

    /// Run boundary detection on a set of parse results.
    pub fn detect(
        &self,
        parse_results: &[ParseResult],
    ) -> Result<BoundaryScanResult, BoundaryError> {
        let mut result = BoundaryScanResult::default();

        // Phase 1: Detect frameworks and extract models
        let detected_frameworks = self.detect_frameworks(parse_results);
        result.frameworks_detected = detected_frameworks.clone();

        for pr in parse_results {
            for extractor in &self.extractors {
                if detected_frameworks.contains(&extractor.framework()) {
                    let models = extractor.extract_models(pr);
                    for model in models {
                        result.total_fields += model.fields.len();
                        result.boundaries.extend(self.boundaries_for_model(pr, &model));
                        result.models.push(model);
                    }
                }
            }
        }

        // Phase 2: Detect sensitive fields
        for model in &result.models {
            let sensitive = self.sensitive_detector.detect_sensitive_fields(model);
            result.total_sensitive += sensitive.len();
            result.sensitive_fields.extend(sensitive);
        }

        Ok(result)
    }

    /// Emit one `Boundary` per access site the model is touched through in
    /// `pr` (§4.8 Detect phase), or a single indeterminate-operation
    /// boundary for the declaration itself when no access site resolves.
    fn boundaries_for_model(&self, pr: &ParseResult, model: &ExtractedModel) -> Vec<Boundary> {
        let field_names: Vec<String> = model.fields.iter().map(|f| f.name.clone()).collect();
        let table_recognized = model.table_name.is_some();
        let fields_parsed = !field_names.is_empty();

        let access_sites: Vec<&CallSite> = pr
            .call_sites
            .iter()
            .filter(|site| {
                site.receiver
                    .as_deref()
                    .is_some_and(|r| receiver_matches_model(r, model))
            })
            .filter(|site| !is_test_context(&pr.file, site.caller_function.as_deref()))
            .collect();

        if access_sites.is_empty() {
            // No resolvable access site in this file — the declaration
            // itself still counts as a boundary, table name taken straight
            // from the class's literal name rather than a variable.
            let inputs = BoundaryConfidenceInputs {
                table_name_recognized: table_recognized,
                fields_parsed,
                operation_determinable: false,
                framework_matched: true,
                source_is_literal: true,
            };
            return vec![Boundary {
                table: model.table_name.clone(),
                operation: BoundaryOperation::Unknown,
                fields: field_names,
                framework: model.framework,
                file: pr.file.clone(),
                line: model.line,
                confidence: inputs.score(),
            }];
        }

        access_sites
            .into_iter()
            .map(|site| {
                let matched = self
                    .operation_matchers
                    .match_method(&site.callee_name)
                    .filter(|pattern| pattern.framework == model.framework.name());
                let operation = matched
                    .map(|pattern| map_data_operation(pattern.operation))
                    .unwrap_or(BoundaryOperation::Unknown);
                let inputs = BoundaryConfidenceInputs {
                    table_name_recognized: table_recognized,
                    fields_parsed,
                    operation_determinable: operation != BoundaryOperation::Unknown,
                    framework_matched: matched.is_some(),
                    // Reached through a receiver variable (`userRepo.find()`),
                    // not a table-name literal.
                    source_is_literal: false,
                };
                Boundary {
                    table: model.table_name.clone(),
                    operation,
                    fields: field_names.clone(),
                    framework: model.framework,
                    file: pr.file.clone(),
                    line: site.line,
                    confidence: inputs.score(),
                }
            })
            .collect()
    }

    /// Detect which ORM frameworks are used in the codebase.
    fn detect_frameworks(&self, parse_results: &[ParseResult]) -> Vec<OrmFramework> {
        let mut detected = Vec::new();

        for sig in &self.signatures {
            let is_used = parse_results.iter().any(|pr| {
                pr.imports.iter().any(|imp| {
                    sig.import_patterns.iter().any(|pat| imp.source.contains(pat.as_str()))
                })
            });

            if is_used {
                detected.push(sig.framework);
            }
        }

        detected
    }
}

impl Default for BoundaryDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Build framework detection signatures.
fn build_framework_signatures() -> Vec<FrameworkSignature> {
    vec![
        FrameworkSignature {
            framework: OrmFramework::Sequelize,
            import_patterns: vec!["sequelize".into()],
            decorator_patterns: vec![],
            schema_file_patterns: vec!["*.model.ts".into(), "*.model.js".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::TypeOrm,
            import_patterns: vec!["typeorm".into()],
            decorator_patterns: vec!["Entity".into(), "Column".into()],
            schema_file_patterns: vec!["*.entity.ts".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::Prisma,
            import_patterns: vec!["@prisma/client".into()],
            decorator_patterns: vec![],
            schema_file_patterns: vec!["schema.prisma".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::Mongoose,
            import_patterns: vec!["mongoose".into()],
            decorator_patterns: vec![],
            schema_file_patterns: vec!["*.schema.ts".into(), "*.schema.js".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::Django,
            import_patterns: vec!["django.db".into()],
            decorator_patterns: vec![],
            schema_file_patterns: vec!["models.py".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::SqlAlchemy,
            import_patterns: vec!["sqlalchemy".into()],
            decorator_patterns: vec![],
            schema_file_patterns: vec!["models.py".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::ActiveRecord,
            import_patterns: vec!["active_record".into()],
            decorator_patterns: vec![],
            schema_file_patterns: vec!["*.rb".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::Hibernate,
            import_patterns: vec!["javax.persistence".into(), "jakarta.persistence".into()],
            decorator_patterns: vec!["Entity".into(), "Table".into()],
            schema_file_patterns: vec!["*.java".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::EfCore,
            import_patterns: vec!["Microsoft.EntityFrameworkCore".into()],
            decorator_patterns: vec!["Table".into(), "Key".into()],
            schema_file_patterns: vec!["*.cs".into()],
        },
        FrameworkSignature {
            framework: OrmFramework::Eloquent,
            import_patterns: vec!["Illuminate\\Database".into()],
            decorator_patterns: vec![],
            schema_file_patterns: vec!["*.php".into()],
        },
    ]
}

fn map_data_operation(op: DataOperation) -> BoundaryOperation {
    match op {
        DataOperation::Select => BoundaryOperation::Read,
        DataOperation::Insert | DataOperation::Update => BoundaryOperation::Write,
        DataOperation::Delete => BoundaryOperation::Delete,
        DataOperation::RawQuery => BoundaryOperation::Unknown,
    }
}

/// A call site's receiver expression (`"userRepo"`, `"User"`, `"this.users"`)
/// is attributed to `model` when it names the model directly, follows the
/// `<model>Repository`/`<model>Repo` convention, or mentions the model's
/// table name.
fn receiver_matches_model(receiver: &str, model: &ExtractedModel) -> bool {
    let receiver_lower = receiver.to_lowercase();
    let name_lower = model.name.to_lowercase();
    if receiver_lower == name_lower || receiver_lower.ends_with(&name_lower) {
        return true;
    }
    if let Some(table) = model.table_name.as_deref() {
        if receiver_lower == table || receiver_lower.ends_with(table) {
            return true;
        }
    }
    false
}

/// §4.8 false-positive filter: strings inside mock/test prefixes and known
/// test-framework call sites don't count as real access points.
fn is_test_context(file: &str, caller_function: Option<&str>) -> bool {
    let file_lower = file.to_lowercase();
    let in_test_file = file_lower.contains("/test/")
        || file_lower.contains("/tests/")
        || file_lower.contains("/spec/")
        || file_lower.contains("__tests__")
        || file_lower.ends_with(".test.ts")
        || file_lower.ends_with(".test.js")
        || file_lower.ends_with(".spec.ts")
        || file_lower.ends_with(".spec.js")
        || file_lower.ends_with("_test.py")
        || file_lower.ends_with("_test.rb");
    if in_test_file {
        return true;
    }
    caller_function.is_some_and(|name| {
        let lower = name.to_lowercase();
        lower.starts_with("test") || lower.starts_with("it_") || lower.contains("mock")
    })
}
