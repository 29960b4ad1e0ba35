//! Per-framework field extractors, one `FieldExtractor` impl per ORM.

use crate::parsers::types::ParseResult;

use super::types::{ExtractedModel, OrmFramework};

mod generic;
mod sequelize;
mod typeorm;

pub use generic::{
    ActiveRecordExtractor, DjangoExtractor, EfCoreExtractor, EloquentExtractor,
    HibernateExtractor, MongooseExtractor, PrismaExtractor, SqlAlchemyExtractor,
};
pub use sequelize::SequelizeExtractor;
pub use typeorm::TypeOrmExtractor;

/// Extracts models/fields for one ORM framework from a parsed file.
pub trait FieldExtractor: Send + Sync {
    fn framework(&self) -> OrmFramework;
    fn schema_file_patterns(&self) -> &[&str];
    fn extract_models(&self, pr: &ParseResult) -> Vec<ExtractedModel>;
}

/// All built-in extractors, one per recognized ORM.
pub fn create_all_extractors() -> Vec<Box<dyn FieldExtractor>> {
    vec![
        Box::new(SequelizeExtractor),
        Box::new(TypeOrmExtractor),
        Box::new(PrismaExtractor),
        Box::new(MongooseExtractor),
        Box::new(DjangoExtractor),
        Box::new(SqlAlchemyExtractor),
        Box::new(ActiveRecordExtractor),
        Box::new(HibernateExtractor),
        Box::new(EfCoreExtractor),
        Box::new(EloquentExtractor),
    ]
}
