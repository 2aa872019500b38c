use clap::{Args, Parser, Subcommand};

use crate::{config, utils};

#[derive(Args, Debug, Clone)]
pub struct RunMigrationsArgs {
    /// Migration file name, relative to `dir`
    #[arg(short, long)]
    file: String,
    /// Directory holding the migration templates
    #[arg(short, long, default_value = "../migrations")]
    dir: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Applies a migration file to the configured database
    RunMigrations(RunMigrationsArgs),
    /// Inserts two users, each with one pet available for breeding
    SeedDemo,
}

/// Maintenance tasks for the petmate database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        let db_pool = utils::setup_sqlite_db_pool(config::APP_CONFIG.is_prod()).await?;

        match &self.action {
            Action::RunMigrations(RunMigrationsArgs { file, dir }) => {
                utils::run_migrations(&db_pool, dir, file).await
            }
            Action::SeedDemo => {
                for (owner, pet) in utils::seed_demo(&db_pool).await? {
                    println!("user {owner} owns pet {pet}");
                }
                Ok(())
            }
        }
    }
}
