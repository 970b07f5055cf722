use anyhow::{bail, Result};

use countup_core::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
