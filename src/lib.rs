pub mod cli;
pub mod config;
pub mod error;
pub mod rpc;
pub mod service;
pub mod types;

pub use error::{BootstrapError, RemoteError};
pub use rpc::{ProcedureInvoker, RestRpcInvoker};
pub use service::SchemaBootstrap;
pub use types::{ProvisionedTable, TableName};
