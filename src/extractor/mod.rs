pub mod path;
pub mod query;
pub mod schema_validated;
