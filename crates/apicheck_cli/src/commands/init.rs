//! Write a default configuration file.

use anyhow::{bail, Context, Result};
use apicheck_core::Config;
use std::path::Path;

/// Write a default config to `path`.
pub fn run(path: &Path, base_url: Option<&str>, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(url) = base_url {
        config.target.base_url = url.to_string();
    }
    config
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote {}", path.display());
    println!();
    println!("  [target]   base_url = {}", config.target.base_url);
    println!("  [account]  email    = {}", config.account.email);
    println!(
        "  [suite]    limit    = {}, ids = {:?}, missing id = {}",
        config.suite.list_limit, config.suite.lookup_ids, config.suite.missing_id
    );

    Ok(())
}
