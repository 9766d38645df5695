use clap::Parser;
use mimalloc::MiMalloc;
use schema_bootstrap::{
    RestRpcInvoker, SchemaBootstrap,
    cli::{Cli, Command, Target},
    config::Config,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        supabase_url = %cfg.supabase_url,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        loglevel = %cfg.loglevel
    );

    let facade = SchemaBootstrap::new(RestRpcInvoker::new(&cfg)?);

    match cli.command {
        Command::Ensure { target: Target::All } => {
            for (table, payload) in facade.ensure_all().await? {
                info!(table = %table, payload = %payload, "table ensured");
            }
        }
        Command::Ensure {
            target: Target::Table(table),
        } => {
            let payload = facade.ensure(table).await?;
            info!(table = %table, payload = %payload, "table ensured");
        }
        Command::Exists { table } => {
            let payload = facade.table_exists(&table).await?;
            println!("{payload}");
        }
    }
    Ok(())
}
