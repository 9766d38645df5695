//! Remote procedure plumbing.
//!
//! Layout:
//! - `invoker.rs`: the `ProcedureInvoker` capability the façade is built on
//! - `rest.rs`: HTTP implementation against the `/rest/v1/rpc/<procedure>` endpoint

pub mod invoker;
pub mod rest;

pub use invoker::{Params, ProcedureInvoker};
pub use rest::RestRpcInvoker;
