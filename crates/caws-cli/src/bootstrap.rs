use std::path::{Path, PathBuf};

use anyhow::Context;
use caws_config::CawsConfig;

pub fn load_config() -> anyhow::Result<CawsConfig> {
    load_project_dotenv()?;
    CawsConfig::load().context("failed to load caws configuration")
}

fn load_project_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    if let Some(root) = find_project_root(&cwd) {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return Ok(());
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}

/// Nearest ancestor of `start` (inclusive) holding a `.caws` directory.
fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".caws").is_dir())
        .map(Path::to_path_buf)
}
