pub mod config;
pub mod render;

use clap::Subcommand;

use crate::config::Settings;

#[derive(Subcommand)]
pub enum Commands {
    /// Render records read from a JSON file or stdin
    Render(render::RenderArgs),
    /// Print the effective configuration
    Config(config::ConfigArgs),
}

impl Commands {
    pub fn run(self, settings: &Settings) -> anyhow::Result<()> {
        match self {
            Commands::Render(args) => render::run(args, settings),
            Commands::Config(args) => config::run(args, settings),
        }
    }
}
