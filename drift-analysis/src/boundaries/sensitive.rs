//! Sensitive-field classification (spec §4.8): a layered pattern table
//! grouped by class, each entry carrying a prior confidence. A field
//! matches at most one class; ties go to the highest prior.

use super::types::{ExtractedModel, SensitiveCategory, SensitiveField};

struct CategoryPattern {
    category: SensitiveCategory,
    needles: &'static [&'static str],
    prior: f32,
}

const PATTERNS: &[CategoryPattern] = &[
    CategoryPattern {
        category: SensitiveCategory::Credentials,
        needles: &["password", "passwd", "secret", "api_key", "apikey", "token", "private_key"],
        prior: 0.90,
    },
    CategoryPattern {
        category: SensitiveCategory::Financial,
        needles: &["credit_card", "card_number", "cvv", "iban", "bank_account", "routing_number", "ssn"],
        prior: 0.85,
    },
    CategoryPattern {
        category: SensitiveCategory::Health,
        needles: &["diagnosis", "medical", "health_record", "prescription", "patient_id"],
        prior: 0.80,
    },
    CategoryPattern {
        category: SensitiveCategory::Pii,
        needles: &["email", "phone", "address", "date_of_birth", "dob", "first_name", "last_name", "national_id", "passport"],
        prior: 0.65,
    },
];

/// Matches model field names against the layered sensitive-data pattern
/// table.
pub struct SensitiveFieldDetector;

impl SensitiveFieldDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect_sensitive_fields(&self, model: &ExtractedModel) -> Vec<SensitiveField> {
        let mut found = Vec::new();
        for field in &model.fields {
            let lower = field.name.to_lowercase();
            let mut best: Option<&CategoryPattern> = None;
            for pattern in PATTERNS {
                if pattern.needles.iter().any(|n| lower.contains(n)) {
                    match best {
                        Some(current) if current.prior >= pattern.prior => {}
                        _ => best = Some(pattern),
                    }
                }
            }
            if let Some(pattern) = best {
                found.push(SensitiveField {
                    model_name: model.name.clone(),
                    field_name: field.name.clone(),
                    category: pattern.category,
                    confidence: pattern.prior,
                    file: model.file.clone(),
                    line: field.line,
                });
            }
        }
        found
    }
}

impl Default for SensitiveFieldDetector {
    fn default() -> Self {
        Self::new()
    }
}
