use std::path::Path;

use anyhow::Result;

use slotreel_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config: {}", path.display());
    } else {
        config.save_to(path)?;
        println!("Wrote default config to {}", path.display());
    }

    println!("Data directory: {}", config.data_dir().display());
    println!("Log file: {}", config.log_path().display());

    Ok(())
}
