use confx_build::DockerfileGenerator;
use std::io::Write;
use std::path::Path;

pub fn render(project_dir: &Path) -> anyhow::Result<()> {
    let config = super::load_config(project_dir)?;
    let dockerfile = DockerfileGenerator::from_config(&config).render_bytes();

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&dockerfile)?;
    stdout.flush()?;
    Ok(())
}
