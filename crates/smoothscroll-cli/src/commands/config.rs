use anyhow::Result;

use smoothscroll_core::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        println!("Configuration already exists: {}", path.display());
        println!("\nTo overwrite it with the defaults, run:");
        println!("  smoothscroll config init --force");
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
