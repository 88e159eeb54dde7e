use clap::{Parser, Subcommand};

mod db;
mod restaurant;
mod user;

#[derive(Debug, Parser)]
#[command(name = "miam-app", about = "Miam admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Restaurant(restaurant::RestaurantCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Restaurant(command) => restaurant::run(command).await,
        }
    }
}
