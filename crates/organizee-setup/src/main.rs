use anyhow::Result;

use clap::{Parser, Subcommand};

use organizee_db::{schema, Connection};

mod seed;

#[derive(Parser, Debug)]
#[clap(name = "organizee-setup")]
struct Cli {
    #[clap(default_value = "organizee.sqlite3")]
    pub database: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Init,
    Seed,
}

/// Initialize the database
async fn db_init(filename: &str) -> Result<Connection> {
    let db = Connection::open(filename).await?;
    schema::install(&db).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init => {
            db_init(&cli.database).await?;
        }
        Command::Seed => {
            let db = db_init(&cli.database).await?;
            seed::install(&db).await?;
        }
    }
    Ok(())
}
