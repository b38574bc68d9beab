mod init;
mod render;
mod write;

use confx_core::ConfxConfig;
use std::path::Path;

pub use init::init;
pub use render::render;
pub use write::write;

/// Load confx.toml, refusing configs that would render an unnamed service.
///
/// An empty workspace turns the binary copy into `/go/src/cmd -> /go/bin`,
/// which no build produces.
pub(crate) fn load_config(project_dir: &Path) -> anyhow::Result<ConfxConfig> {
    let config = ConfxConfig::load(project_dir)?;
    if config.project.workspace().is_empty() {
        anyhow::bail!("project name is empty; set [project].name in confx.toml");
    }
    Ok(config)
}
