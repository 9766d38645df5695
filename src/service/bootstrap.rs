use crate::rpc::{Params, ProcedureInvoker};
use crate::types::{ProvisionedTable, TableName};
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Procedure that reports whether a table is present.
pub const TABLE_EXISTS_PROCEDURE: &str = "table_exists";

/// Idempotent "ensure table exists" operations.
///
/// Each operation is exactly one remote call. Payloads and errors from the invoker are
/// returned unchanged; idempotency is the remote procedure's contract.
#[derive(Debug, Clone)]
pub struct SchemaBootstrap<I> {
    invoker: I,
}

impl<I: ProcedureInvoker> SchemaBootstrap<I> {
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Ask the backend whether `table_name` exists. The payload shape is left to the caller.
    pub async fn table_exists(&self, table_name: &TableName) -> Result<Value, I::Error> {
        let mut params = Params::new();
        params.insert(
            "table_name".to_string(),
            Value::String(table_name.as_str().to_string()),
        );
        debug!(table = %table_name, "checking table existence");
        self.invoker.invoke(TABLE_EXISTS_PROCEDURE, params).await
    }

    pub async fn create_orders_table_if_not_exists(&self) -> Result<Value, I::Error> {
        self.ensure(ProvisionedTable::Orders).await
    }

    pub async fn create_packages_table_if_not_exists(&self) -> Result<Value, I::Error> {
        self.ensure(ProvisionedTable::Packages).await
    }

    pub async fn create_transactions_table_if_not_exists(&self) -> Result<Value, I::Error> {
        self.ensure(ProvisionedTable::Transactions).await
    }

    /// Run the provisioning procedure for `table`. No existence check is made first.
    pub async fn ensure(&self, table: ProvisionedTable) -> Result<Value, I::Error> {
        debug!(table = %table, procedure = table.procedure(), "provisioning table");
        self.invoker.invoke(table.procedure(), Params::new()).await
    }

    /// Provision every known table concurrently; results follow [`ProvisionedTable::ALL`].
    ///
    /// Every call is issued and awaited even when one fails; the first failure in table
    /// order is returned.
    pub async fn ensure_all(&self) -> Result<Vec<(ProvisionedTable, Value)>, I::Error> {
        let outcomes = join_all(
            ProvisionedTable::ALL
                .into_iter()
                .map(|table| async move { (table, self.ensure(table).await) }),
        )
        .await;

        // Collected once before short-circuiting so every failure is logged.
        let results = outcomes
            .into_iter()
            .map(|(table, outcome)| {
                outcome
                    .inspect_err(|e| warn!(table = %table, error = %e, "provisioning failed"))
                    .map(|payload| (table, payload))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = results.len(), "all tables provisioned");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use std::sync::Mutex;

    /// Answers every call with the same outcome and records the calls.
    struct FixedInvoker {
        outcome: Result<Value, RemoteError>,
        calls: Mutex<Vec<(String, Params)>>,
    }

    impl FixedInvoker {
        fn new(outcome: Result<Value, RemoteError>) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProcedureInvoker for FixedInvoker {
        type Error = RemoteError;

        async fn invoke(&self, procedure: &str, params: Params) -> Result<Value, RemoteError> {
            self.calls
                .lock()
                .unwrap()
                .push((procedure.to_string(), params));
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn ensure_sends_no_parameters() {
        let facade = SchemaBootstrap::new(FixedInvoker::new(Ok(Value::Null)));
        facade.ensure(ProvisionedTable::Packages).await.unwrap();

        let calls = facade.invoker().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "create_packages_table_if_not_exists");
        assert!(calls[0].1.is_empty());
    }

    #[tokio::test]
    async fn ensure_all_reports_in_table_order() {
        let facade = SchemaBootstrap::new(FixedInvoker::new(Ok(Value::from("ok"))));
        let results = facade.ensure_all().await.unwrap();

        let tables: Vec<_> = results.iter().map(|(t, _)| *t).collect();
        assert_eq!(tables, ProvisionedTable::ALL.to_vec());
        assert!(results.iter().all(|(_, v)| v == "ok"));
        assert_eq!(facade.invoker().calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn ensure_all_surfaces_failure() {
        let err = RemoteError::new("permission denied");
        let facade = SchemaBootstrap::new(FixedInvoker::new(Err(err.clone())));
        assert_eq!(facade.ensure_all().await.unwrap_err(), err);
    }
}
