pub mod table;

pub use table::{ProvisionedTable, TableName};
