use confx_core::config::CONFIG_FILE_NAME;
use std::path::Path;

const CONFX_TOML: &str = r#"[project]
# name = "my-service"
# workspace = "my-service"   # directory under cmd/, defaults to name
# command = "my-service"     # entrypoint binary, defaults to workspace

[docker]
# build_image = "golang:1.20-buster"
# runtime_image = "alpine"
# openapi = false

[docker.go_proxy]
# proxy_on = false
# host = "https://goproxy.cn,direct"

# [[env]]
# key = "HTTP_PORT"
# value = "8080"
# expose = true
"#;

/// Scaffold confx.toml in the project directory.
pub fn init(project_dir: &Path) -> anyhow::Result<()> {
    let path = project_dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        eprintln!("{CONFIG_FILE_NAME} already exists, skipping");
        return Ok(());
    }

    std::fs::write(&path, CONFX_TOML)?;
    println!("Created {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {CONFIG_FILE_NAME}");
    println!("  2. confx write");
    Ok(())
}
