use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::env::EnvVars;

/// Name of the configuration file looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "confx.toml";

const DEFAULT_BUILD_IMAGE: &str = "golang:1.20-buster";
const DEFAULT_RUNTIME_IMAGE: &str = "alpine";
const DEFAULT_GOPROXY_HOST: &str = "https://goproxy.cn,direct";

/// confx.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfxConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub docker: DockerConfig,
    /// Environment variables, in declaration order.
    #[serde(default)]
    pub env: EnvVars,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name (defaults to the project directory name)
    #[serde(default)]
    pub name: String,
    /// Directory under `cmd/` holding the service (defaults to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    /// Binary name used for the entrypoint (defaults to the workspace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// Docker build settings.
///
/// Empty fields are filled by [`DockerConfig::apply_defaults`] right before
/// rendering, so an explicit `build_image = ""` behaves like an omitted one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Go builder image
    #[serde(default)]
    pub build_image: String,
    /// Runtime base image
    #[serde(default)]
    pub runtime_image: String,
    #[serde(default)]
    pub go_proxy: GoProxyConfig,
    /// Copy generated `openapi.json` and swagger `docs/` into the runtime image
    #[serde(default)]
    pub openapi: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoProxyConfig {
    /// Pass `GOPROXY` to the build stage
    #[serde(default)]
    pub proxy_on: bool,
    #[serde(default)]
    pub host: String,
}

impl ProjectConfig {
    /// Workspace identifier: `workspace` when set, otherwise the project name.
    pub fn workspace(&self) -> &str {
        match non_empty(self.workspace.as_deref()) {
            Some(workspace) => workspace,
            None => &self.name,
        }
    }

    /// Entrypoint binary name: `command` when set, otherwise the workspace.
    pub fn command(&self) -> &str {
        match non_empty(self.command.as_deref()) {
            Some(command) => command,
            None => self.workspace(),
        }
    }
}

impl DockerConfig {
    /// Fill empty fields with their fallback values.
    ///
    /// Only empty fields are touched, so applying this more than once is a
    /// no-op after the first call.
    pub fn apply_defaults(&mut self) {
        if self.build_image.is_empty() {
            self.build_image = DEFAULT_BUILD_IMAGE.to_owned();
        }
        if self.runtime_image.is_empty() {
            self.runtime_image = DEFAULT_RUNTIME_IMAGE.to_owned();
        }
        if self.go_proxy.proxy_on && self.go_proxy.host.is_empty() {
            self.go_proxy.host = DEFAULT_GOPROXY_HOST.to_owned();
        }
    }

    /// A copy of this config with defaults applied.
    pub fn resolved(&self) -> Self {
        let mut config = self.clone();
        config.apply_defaults();
        config
    }
}

impl ConfxConfig {
    /// Load from confx.toml in the given directory, or return defaults if not found.
    ///
    /// An empty `project.name` falls back to the directory name.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        let mut config = if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            Self::from_toml_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Self::default()
        };

        if config.project.name.is_empty() {
            if let Some(dir_name) = dir_name(project_dir) {
                tracing::debug!(name = %dir_name, "project name taken from directory");
                config.project.name = dir_name;
            }
        }

        Ok(config)
    }

    /// Parse confx.toml content without touching the filesystem.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn dir_name(dir: &Path) -> Option<String> {
    let resolved = match std::fs::canonicalize(dir) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "cannot canonicalize project dir");
            dir.to_path_buf()
        }
    };
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, workspace: Option<&str>, command: Option<&str>) -> ProjectConfig {
        ProjectConfig {
            name: name.to_owned(),
            workspace: workspace.map(str::to_owned),
            command: command.map(str::to_owned),
        }
    }

    #[test]
    fn defaults_fill_empty_images() {
        let config = DockerConfig::default().resolved();
        assert_eq!(config.build_image, "golang:1.20-buster");
        assert_eq!(config.runtime_image, "alpine");
        assert!(config.go_proxy.host.is_empty());
    }

    #[test]
    fn defaults_keep_configured_images() {
        let config = DockerConfig {
            build_image: "golang:1.22-bookworm".to_owned(),
            runtime_image: "gcr.io/distroless/static".to_owned(),
            ..Default::default()
        }
        .resolved();
        assert_eq!(config.build_image, "golang:1.22-bookworm");
        assert_eq!(config.runtime_image, "gcr.io/distroless/static");
    }

    #[test]
    fn proxy_host_defaulted_only_when_on() {
        let on = DockerConfig {
            go_proxy: GoProxyConfig {
                proxy_on: true,
                host: String::new(),
            },
            ..Default::default()
        }
        .resolved();
        assert_eq!(on.go_proxy.host, "https://goproxy.cn,direct");

        let off = DockerConfig::default().resolved();
        assert_eq!(off.go_proxy.host, "");
    }

    #[test]
    fn proxy_host_kept_when_set() {
        let config = DockerConfig {
            go_proxy: GoProxyConfig {
                proxy_on: true,
                host: "https://proxy.golang.org".to_owned(),
            },
            ..Default::default()
        }
        .resolved();
        assert_eq!(config.go_proxy.host, "https://proxy.golang.org");
    }

    #[test]
    fn workspace_falls_back_to_name() {
        assert_eq!(project("svc", None, None).workspace(), "svc");
        assert_eq!(project("svc", Some(""), None).workspace(), "svc");
        assert_eq!(project("svc", Some("api"), None).workspace(), "api");
    }

    #[test]
    fn command_falls_back_to_workspace() {
        assert_eq!(project("svc", None, None).command(), "svc");
        assert_eq!(project("svc", Some("api"), None).command(), "api");
        assert_eq!(project("svc", Some("api"), Some("")).command(), "api");
        assert_eq!(project("svc", Some("api"), Some("server")).command(), "server");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn image() -> impl Strategy<Value = String> {
            prop_oneof![Just(String::new()), "[a-z]{1,8}(:[0-9.]{1,5})?"]
        }

        fn docker_config() -> impl Strategy<Value = DockerConfig> {
            (image(), image(), any::<bool>(), image(), any::<bool>()).prop_map(
                |(build_image, runtime_image, proxy_on, host, openapi)| DockerConfig {
                    build_image,
                    runtime_image,
                    go_proxy: GoProxyConfig { proxy_on, host },
                    openapi,
                },
            )
        }

        proptest! {
            #[test]
            fn defaults_are_idempotent(config in docker_config()) {
                let once = config.resolved();
                let twice = once.resolved();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn resolved_images_never_empty(config in docker_config()) {
                let resolved = config.resolved();
                prop_assert!(!resolved.build_image.is_empty());
                prop_assert!(!resolved.runtime_image.is_empty());
                prop_assert_eq!(resolved.openapi, config.openapi);
                prop_assert_eq!(resolved.go_proxy.proxy_on, config.go_proxy.proxy_on);
            }
        }
    }
}
