//! TypeORM field extractor (TypeScript).

use crate::parsers::types::ParseResult;
use super::{FieldExtractor, ExtractedModel, OrmFramework};
use crate::boundaries::types::{BoundaryConfidenceInputs, ExtractedField};

pub struct TypeOrmExtractor;

impl FieldExtractor for TypeOrmExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::TypeOrm }
    fn schema_file_patterns(&self) -> &[&str] { &["*.entity.ts"] }

    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel> {
        let mut models = Vec::new();
        for class in &pr.classes {
            let is_typeorm = class.decorators.iter().any(|d| d.name == "Entity");
            if is_typeorm {
                let has_explicit_pk = class
                    .decorators
                    .iter()
                    .any(|d| d.name == "PrimaryGeneratedColumn" || d.name == "PrimaryColumn");
                let fields: Vec<ExtractedField> = class.field_names.iter().map(|name| {
                    let is_pk = name == "id" || has_explicit_pk;
                    ExtractedField {
                        name: name.clone(),
                        field_type: None,
                        is_primary_key: is_pk,
                        is_nullable: false,
                        is_unique: false,
                        default_value: None,
                        line: class.line,
                    }
                }).collect();

                let table_name = Some(class.name.to_lowercase());
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
                    framework: OrmFramework::TypeOrm,
                    fields,
                    relationships: Vec::new(),
                    confidence,
                });
            }
        }
        models
    }
}
