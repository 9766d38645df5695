use serde_json::{Map, Value};
use std::future::Future;

/// Named parameters sent with a procedure call.
pub type Params = Map<String, Value>;

/// Executes one named remote procedure and returns its payload or the remote error.
///
/// The error type is left to the implementation so that whatever the remote side reports
/// reaches the caller as-is.
pub trait ProcedureInvoker: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn invoke(
        &self,
        procedure: &str,
        params: Params,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;
}

impl<T: ProcedureInvoker> ProcedureInvoker for std::sync::Arc<T> {
    type Error = T::Error;

    fn invoke(
        &self,
        procedure: &str,
        params: Params,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        (**self).invoke(procedure, params)
    }
}
