use crate::error::BootstrapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical table identifier. Existence and uniqueness are owned by the remote system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Result<Self, BootstrapError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BootstrapError::EmptyTableName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TableName {
    type Error = BootstrapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableName> for String {
    fn from(value: TableName) -> Self {
        value.0
    }
}

impl FromStr for TableName {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tables that have a dedicated provisioning procedure on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisionedTable {
    Orders,
    Packages,
    Transactions,
}

impl ProvisionedTable {
    pub const ALL: [ProvisionedTable; 3] = [Self::Orders, Self::Packages, Self::Transactions];

    pub fn name(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Packages => "packages",
            Self::Transactions => "transactions",
        }
    }

    pub fn table_name(self) -> TableName {
        TableName(self.name().to_string())
    }

    /// Remote procedure that creates this table when it is missing.
    pub fn procedure(self) -> &'static str {
        match self {
            Self::Orders => "create_orders_table_if_not_exists",
            Self::Packages => "create_packages_table_if_not_exists",
            Self::Transactions => "create_transactions_table_if_not_exists",
        }
    }
}

impl FromStr for ProvisionedTable {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BootstrapError::UnknownTable(s.to_string()))
    }
}

impl fmt::Display for ProvisionedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
