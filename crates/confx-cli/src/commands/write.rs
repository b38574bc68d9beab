use confx_build::DockerfileGenerator;
use confx_build::output::write_dockerfile;
use std::path::{Path, PathBuf};

pub fn write(project_dir: &Path, output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let config = super::load_config(project_dir)?;

    let dockerfile = DockerfileGenerator::from_config(&config).render_bytes();
    let path = match output {
        Some(path) => path,
        None => project_dir.join("Dockerfile"),
    };
    write_dockerfile(&path, &dockerfile, force)?;

    tracing::info!(
        path = %path.display(),
        workspace = config.project.workspace(),
        "Dockerfile generated"
    );
    println!("Wrote {}", path.display());
    Ok(())
}
