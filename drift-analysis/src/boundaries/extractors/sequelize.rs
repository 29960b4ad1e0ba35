//! Sequelize field extractor (JavaScript/TypeScript).

use crate::parsers::types::ParseResult;
use super::{FieldExtractor, ExtractedModel, OrmFramework};
use crate::boundaries::types::{BoundaryConfidenceInputs, ExtractedField};

pub struct SequelizeExtractor;

impl FieldExtractor for SequelizeExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::Sequelize }
    fn schema_file_patterns(&self) -> &[&str] { &["*.model.ts", "*.model.js"] }

    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel> {
        let mut models = Vec::new();
        // Sequelize models are typically classes extending Model or decorated with @Table.
        for class in &pr.classes {
            let is_sequelize = class.extends.iter().any(|e| e == "Model")
                || class.decorators.iter().any(|d| d.name == "Table");
            if is_sequelize {
                let fields: Vec<ExtractedField> = class.field_names.iter().map(|name| ExtractedField {
                    name: name.clone(),
                    field_type: None,
                    is_primary_key: name == "id",
                    is_nullable: false,
                    is_unique: false,
                    default_value: None,
                    line: class.line,
                }).collect();

                let table_name = Some(class.name.to_lowercase() + "s");
                let confidence = BoundaryConfidenceInputs {
                    table_name_recognized: table_name.is_some(),
                    fields_parsed: !fields.is_empty(),
                    operation_determinable: false,
                    framework_matched: true,
                    source_is_literal: true,
                }
                .score();

                models.push(ExtractedModel {
                    name: class.name.clone(),
                    table_name,
                    file: pr.file.clone(),
                    line: class.line,
                    framework: OrmFramework::Sequelize,
                    fields,
                    relationships: Vec::new(),
                    confidence,
                });
            }
        }
        models
    }
}
