//! Extractors for the remaining class/decorator-based ORMs. Each follows
//! the same shape as `sequelize.rs`/`typeorm.rs`: a model is any class
//! whose `extends`/`decorators` match the framework's marker, fields come
//! straight from `ClassInfo::field_names` since the parser doesn't carry
//! per-field type annotations.

use crate::boundaries::types::{BoundaryConfidenceInputs, ExtractedField};
use crate::parsers::types::{ClassInfo, ParseResult};

use super::{ExtractedModel, FieldExtractor, OrmFramework};

fn fields_from(class: &ClassInfo, pk_names: &[&str]) -> Vec<ExtractedField> {
    class
        .field_names
        .iter()
        .map(|name| ExtractedField {
            name: name.clone(),
            field_type: None,
            is_primary_key: pk_names.contains(&name.as_str()),
            is_nullable: false,
            is_unique: false,
            default_value: None,
            line: class.line,
        })
        .collect()
}

/// §4.8 weighted confidence sum, applied at model-extraction time: the
/// operation and variable-vs-literal components don't apply to a bare
/// declaration, so only table name / fields / framework are scored, plus
/// the literal-source point since the table name here always comes
/// straight from the class's own identifier rather than a variable.
fn declaration_confidence(table_name: &Option<String>, fields: &[ExtractedField]) -> f32 {
    BoundaryConfidenceInputs {
        table_name_recognized: table_name.is_some(),
        fields_parsed: !fields.is_empty(),
        operation_determinable: false,
        framework_matched: true,
        source_is_literal: true,
    }
    .score()
}

pub struct HibernateExtractor;

impl FieldExtractor for HibernateExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::Hibernate }
    fn schema_file_patterns(&self) -> &[&str] { &["*.java"] }

    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel> {
        pr.classes
            .iter()
            .filter(|c| c.decorators.iter().any(|d| d.name == "Entity"))
            .map(|c| {
                let table_name = Some(c.name.to_lowercase());
                let fields = fields_from(c, &["id"]);
                let confidence = declaration_confidence(&table_name, &fields);
                ExtractedModel {
                    name: c.name.clone(),
                    table_name,
                    file: pr.file.clone(),
                    line: c.line,
                    framework: OrmFramework::Hibernate,
                    fields,
                    relationships: Vec::new(),
                    confidence,
                }
            })
            .collect()
    }
}

pub struct EfCoreExtractor;

impl FieldExtractor for EfCoreExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::EfCore }
    fn schema_file_patterns(&self) -> &[&str] { &["*.cs"] }

    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel> {
        pr.classes
            .iter()
            .filter(|c| c.decorators.iter().any(|d| d.name == "Table" || d.name == "Key"))
            .map(|c| {
                let table_name = Some(c.name.to_lowercase());
                let fields = fields_from(c, &["Id"]);
                let confidence = declaration_confidence(&table_name, &fields);
                ExtractedModel {
                    name: c.name.clone(),
                    table_name,
                    file: pr.file.clone(),
                    line: c.line,
                    framework: OrmFramework::EfCore,
                    fields,
                    relationships: Vec::new(),
                    confidence,
                }
            })
            .collect()
    }
}

pub struct DjangoExtractor;

impl FieldExtractor for DjangoExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::Django }
    fn schema_file_patterns(&self) -> &[&str] { &["models.py"] }

    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel> {
        pr.classes
            .iter()
            .filter(|c| c.extends.iter().any(|e| e.contains("Model")))
            .map(|c| {
                let table_name = Some(c.name.to_lowercase());
                let fields = fields_from(c, &["id"]);
                let confidence = declaration_confidence(&table_name, &fields);
                ExtractedModel {
                    name: c.name.clone(),
                    table_name,
                    file: pr.file.clone(),
                    line: c.line,
                    framework: OrmFramework::Django,
                    fields,
                    relationships: Vec::new(),
                    confidence,
                }
            })
            .collect()
    }
}

pub struct SqlAlchemyExtractor;

impl FieldExtractor for SqlAlchemyExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::SqlAlchemy }
    fn schema_file_patterns(&self) -> &[&str] { &["models.py"] }

    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel> {
        pr.classes
            .iter()
            .filter(|c| c.extends.iter().any(|e| e.contains("Base")))
            .map(|c| {
                let table_name = Some(c.name.to_lowercase());
                let fields = fields_from(c, &["id"]);
                let confidence = declaration_confidence(&table_name, &fields);
                ExtractedModel {
                    name: c.name.clone(),
                    table_name,
                    file: pr.file.clone(),
                    line: c.line,
                    framework: OrmFramework::SqlAlchemy,
                    fields,
                    relationships: Vec::new(),
                    confidence,
                }
            })
            .collect()
    }
}

pub struct ActiveRecordExtractor;

impl FieldExtractor for ActiveRecordExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::ActiveRecord }
    fn schema_file_patterns(&self) -> &[&str] { &["*.rb"] }

    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel> {
        pr.classes
            .iter()
            .filter(|c| c.extends.iter().any(|e| e.contains("ApplicationRecord") || e.contains("ActiveRecord")))
            .map(|c| {
                let table_name = Some(c.name.to_lowercase() + "s");
                let fields = fields_from(c, &["id"]);
                let confidence = declaration_confidence(&table_name, &fields);
                ExtractedModel {
                    name: c.name.clone(),
                    table_name,
                    file: pr.file.clone(),
                    line: c.line,
                    framework: OrmFramework::ActiveRecord,
                    fields,
                    relationships: Vec::new(),
                    confidence,
                }
            })
            .collect()
    }
}

pub struct EloquentExtractor;

impl FieldExtractor for EloquentExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::Eloquent }
    fn schema_file_patterns(&self) -> &[&str] { &["*.php"] }

    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel> {
        pr.classes
            .iter()
            .filter(|c| c.extends.iter().any(|e| e.contains("Model")))
            .map(|c| {
                let table_name = Some(c.name.to_lowercase() + "s");
                let fields = fields_from(c, &["id"]);
                let confidence = declaration_confidence(&table_name, &fields);
                ExtractedModel {
                    name: c.name.clone(),
                    table_name,
                    file: pr.file.clone(),
                    line: c.line,
                    framework: OrmFramework::Eloquent,
                    fields,
                    relationships: Vec::new(),
                    confidence,
                }
            })
            .collect()
    }
}

/// Prisma and Mongoose declare their schema outside any class this parser
/// sees (`schema.prisma` is a separate DSL; Mongoose schemas are usually a
/// plain `mongoose.Schema({...})` object literal, not a class). Framework
/// presence is still detected via import scanning in `BoundaryDetector`;
/// these extractors just contribute no models rather than guess at a
/// schema shape the parser doesn't expose.
pub struct PrismaExtractor;

impl FieldExtractor for PrismaExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::Prisma }
    fn schema_file_patterns(&self) -> &[&str] { &["schema.prisma"] }
    fn extract_models(&self, _pr: &ParseResult) -> Vec<ExtractedModel> { Vec::new() }
}

pub struct MongooseExtractor;

impl FieldExtractor for MongooseExtractor {
    fn framework(&self) -> OrmFramework { OrmFramework::Mongoose }
    fn schema_file_patterns(&self) -> &[&str] { &["*.schema.ts", "*.schema.js"] }
    fn extract_models(&self, _pr: &ParseResult) -> Vec<ExtractedModel> { Vec::new() }
}
