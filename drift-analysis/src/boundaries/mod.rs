//! Boundary analyzer (spec §4.8): learn which ORM frameworks a codebase
//! uses, extract their models/fields, then classify sensitive fields.

pub mod detector;
pub mod extractors;
pub mod sensitive;
pub mod types;

pub use detector::BoundaryDetector;
pub use types::{
    BoundaryScanResult, ExtractedField, ExtractedModel, FrameworkSignature, ModelRelationship,
    OrmFramework, RelationshipKind, SensitiveCategory, SensitiveField,
};
