use crate::types::{ProvisionedTable, TableName};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "schema-bootstrap",
    version,
    about = "Provision marketplace tables via remote procedures"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the create-if-not-exists procedure for one table or all of them.
    ///
    /// With `all`, the three procedures run concurrently; each failure is logged and the
    /// command exits with the first one in table order, without reporting the others' results.
    Ensure {
        #[arg(default_value = "all", value_parser = parse_target)]
        target: Target,
    },
    /// Print the backend's answer to `table_exists` for a table on stdout.
    Exists {
        #[arg(value_parser = parse_table_name)]
        table: TableName,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    All,
    Table(ProvisionedTable),
}

fn parse_target(s: &str) -> Result<Target, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(Target::All);
    }
    s.parse().map(Target::Table).map_err(|e| {
        format!("{e} (expected one of: all, orders, packages, transactions)")
    })
}

fn parse_table_name(s: &str) -> Result<TableName, String> {
    TableName::new(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_defaults_to_all() {
        let cli = Cli::try_parse_from(["schema-bootstrap", "ensure"]).unwrap();
        assert!(matches!(cli.command, Command::Ensure { target: Target::All }));
    }

    #[test]
    fn ensure_accepts_known_table() {
        let cli = Cli::try_parse_from(["schema-bootstrap", "ensure", "transactions"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Ensure { target: Target::Table(ProvisionedTable::Transactions) }
        ));
        assert!(Cli::try_parse_from(["schema-bootstrap", "ensure", "users"]).is_err());
    }

    #[test]
    fn exists_rejects_empty_name() {
        assert!(Cli::try_parse_from(["schema-bootstrap", "exists", ""]).is_err());
        let cli = Cli::try_parse_from(["schema-bootstrap", "exists", "users"]).unwrap();
        match cli.command {
            Command::Exists { table } => assert_eq!(table.as_str(), "users"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
