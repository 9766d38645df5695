pub mod bootstrap;

pub use bootstrap::{SchemaBootstrap, TABLE_EXISTS_PROCEDURE};
