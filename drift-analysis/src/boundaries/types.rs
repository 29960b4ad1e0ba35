//! Shared types for boundary analysis: ORM model/field extraction output
//! and sensitive-field classification.

use serde::{Deserialize, Serialize};

/// ORM/ODM frameworks the boundary analyzer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrmFramework {
    Sequelize,
    TypeOrm,
    Prisma,
    Mongoose,
    Django,
    SqlAlchemy,
    ActiveRecord,
    Hibernate,
    EfCore,
    Eloquent,
}

impl OrmFramework {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequelize => "sequelize",
            Self::TypeOrm => "typeorm",
            Self::Prisma => "prisma",
            Self::Mongoose => "mongoose",
            Self::Django => "django",
            Self::SqlAlchemy => "sqlalchemy",
            Self::ActiveRecord => "active_record",
            Self::Hibernate => "hibernate",
            Self::EfCore => "ef_core",
            Self::Eloquent => "eloquent",
        }
    }
}

/// How a framework is recognized in a codebase: import source substrings,
/// class decorator names, and schema-file glob patterns.
#[derive(Debug, Clone)]
pub struct FrameworkSignature {
    pub framework: OrmFramework,
    pub import_patterns: Vec<String>,
    pub decorator_patterns: Vec<String>,
    pub schema_file_patterns: Vec<String>,
}

/// One extracted field/column of a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedField {
    pub name: String,
    pub field_type: Option<String>,
    pub is_primary_key: bool,
    pub is_nullable: bool,
    pub is_unique: bool,
    pub default_value: Option<String>,
    pub line: u32,
}

/// A `belongsTo`/`hasMany`-style relationship to another model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRelationship {
    pub target_model: String,
    pub kind: RelationshipKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipKind {
    HasOne,
    HasMany,
    BelongsTo,
    ManyToMany,
}

/// A single extracted ORM model/entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedModel {
    pub name: String,
    pub table_name: Option<String>,
    pub file: String,
    pub line: u32,
    pub framework: OrmFramework,
    pub fields: Vec<ExtractedField>,
    pub relationships: Vec<ModelRelationship>,
    pub confidence: f32,
}

/// The kind of data access a `Boundary` represents (§3, §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryOperation {
    Read,
    Write,
    Delete,
    Unknown,
}

impl BoundaryOperation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Unknown => "unknown",
        }
    }
}

/// A single data-access point: a table touched through a framework, the
/// kind of access, and the fields involved (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boundary {
    pub table: Option<String>,
    pub operation: BoundaryOperation,
    pub fields: Vec<String>,
    pub framework: OrmFramework,
    pub file: String,
    pub line: u32,
    pub confidence: f32,
}

/// Inputs to the §4.8 weighted confidence sum. Each component is a boolean
/// condition; the weights below are the spec's exact split.
pub struct BoundaryConfidenceInputs {
    pub table_name_recognized: bool,
    pub fields_parsed: bool,
    pub operation_determinable: bool,
    pub framework_matched: bool,
    pub source_is_literal: bool,
}

impl BoundaryConfidenceInputs {
    /// Confidence = weighted sum of: table-name recognized (0.3), fields
    /// parsed (0.2), operation determinable (0.2), framework matched (0.2),
    /// source is a literal not a variable (0.1).
    pub fn score(&self) -> f32 {
        let mut score = 0.0;
        if self.table_name_recognized {
            score += 0.3;
        }
        if self.fields_parsed {
            score += 0.2;
        }
        if self.operation_determinable {
            score += 0.2;
        }
        if self.framework_matched {
            score += 0.2;
        }
        if self.source_is_literal {
            score += 0.1;
        }
        score
    }
}

/// Class of sensitive data a field name matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensitiveCategory {
    Pii,
    Credentials,
    Financial,
    Health,
}

impl SensitiveCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pii => "pii",
            Self::Credentials => "credentials",
            Self::Financial => "financial",
            Self::Health => "health",
        }
    }
}

/// A field classified as carrying sensitive data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveField {
    pub model_name: String,
    pub field_name: String,
    pub category: SensitiveCategory,
    pub confidence: f32,
    pub file: String,
    pub line: u32,
}

/// Aggregate output of a full boundary scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundaryScanResult {
    pub frameworks_detected: Vec<OrmFramework>,
    pub models: Vec<ExtractedModel>,
    pub total_fields: usize,
    pub boundaries: Vec<Boundary>,
    pub sensitive_fields: Vec<SensitiveField>,
    pub total_sensitive: usize,
}
