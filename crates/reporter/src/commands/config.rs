use clap::Args;

use crate::config::Settings;

#[derive(Args)]
pub struct ConfigArgs {
    /// Also print which config file was used
    #[arg(long)]
    source: bool,
}

pub fn run(args: ConfigArgs, settings: &Settings) -> anyhow::Result<()> {
    if args.source {
        match &settings.config_path {
            Some(path) => println!("# from {}", path.display()),
            None => println!("# built-in defaults"),
        }
    }
    print!("{}", toml::to_string_pretty(&settings.to_config())?);
    Ok(())
}
