//! Configuration management commands.

use console::style;

use doclens::Config;

/// Print the effective configuration as TOML.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    match &config.source_path {
        Some(path) => eprintln!("{} Source: {}", style("→").dim(), path.display()),
        None => eprintln!("{} No config file found, showing defaults", style("!").yellow()),
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
