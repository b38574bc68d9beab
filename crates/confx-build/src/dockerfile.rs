use confx_core::{ConfxConfig, DockerConfig, EnvVars};

use crate::path::container_path;

/// Alias of the stage that compiles the service; every `COPY --from` uses it.
const BUILDER_STAGE: &str = "builder";
/// Source tree root inside the build stage.
const SOURCE_ROOT: &str = "/go/src";
/// Per-service build output root inside the build stage.
const BUILD_OUTPUT_ROOT: &str = "/go/src/cmd";
/// Directory holding the binary and its assets in the runtime image.
const RUNTIME_BIN_DIR: &str = "/go/bin";

/// Generates a two-stage (build + runtime) Dockerfile for a Go service.
pub struct DockerfileGenerator<'a> {
    config: &'a DockerConfig,
    workspace: &'a str,
    command: &'a str,
    env_vars: &'a EnvVars,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(
        config: &'a DockerConfig,
        workspace: &'a str,
        command: &'a str,
        env_vars: &'a EnvVars,
    ) -> Self {
        Self {
            config,
            workspace,
            command,
            env_vars,
        }
    }

    /// Generator for a loaded `confx.toml`.
    pub fn from_config(config: &'a ConfxConfig) -> Self {
        Self::new(
            &config.docker,
            config.project.workspace(),
            config.project.command(),
            &config.env,
        )
    }

    /// Render the Dockerfile.
    ///
    /// Defaults are applied to a private copy of the docker config, so the
    /// caller's value is left untouched and repeated renders are identical.
    pub fn render(&self) -> String {
        let config = self.config.resolved();
        tracing::debug!(
            workspace = self.workspace,
            command = self.command,
            build_image = %config.build_image,
            runtime_image = %config.runtime_image,
            goproxy = config.go_proxy.proxy_on,
            openapi = config.openapi,
            "rendering Dockerfile"
        );

        let sections = [
            Some(build_stage(&config)),
            config.go_proxy.proxy_on.then(|| goproxy_arg(&config)),
            Some(self.build_step()),
            Some(runtime_stage(&config)),
            Some(self.binary_copy()),
            config.openapi.then(|| self.openapi_copy()),
            self.expose_ports(),
            Some(self.entrypoint()),
        ];

        sections.into_iter().flatten().collect::<Vec<_>>().join("\n")
    }

    /// [`render`](Self::render) as raw bytes, ready to be written to disk.
    pub fn render_bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }

    fn build_step(&self) -> String {
        format!(
            r#"WORKDIR {SOURCE_ROOT}
COPY ./ ./

# build
RUN make build WORKSPACE={workspace}
"#,
            workspace = self.workspace,
        )
    }

    fn binary_copy(&self) -> String {
        format!(
            "COPY --from={BUILDER_STAGE} {src} {dst}\n",
            src = container_path(&[BUILD_OUTPUT_ROOT, self.workspace, self.workspace]),
            dst = self.binary_path(),
        )
    }

    fn openapi_copy(&self) -> String {
        format!(
            r#"# openapi 3.0
COPY --from={BUILDER_STAGE} {spec_src} {spec_dst}

# gin swagger 2.0
COPY --from={BUILDER_STAGE} {docs_src} {docs_dst}
"#,
            spec_src = container_path(&[BUILD_OUTPUT_ROOT, self.workspace, "openapi.json"]),
            spec_dst = container_path(&[RUNTIME_BIN_DIR, "openapi.json"]),
            docs_src = container_path(&[BUILD_OUTPUT_ROOT, self.workspace, "docs"]),
            docs_dst = container_path(&[RUNTIME_BIN_DIR, "docs"]),
        )
    }

    fn expose_ports(&self) -> Option<String> {
        let lines: String = self
            .env_vars
            .exposed_ports()
            .map(|port| format!("EXPOSE {port}\n"))
            .collect();
        (!lines.is_empty()).then_some(lines)
    }

    fn entrypoint(&self) -> String {
        format!(
            r#"ARG PROJECT_NAME
ARG PROJECT_VERSION
ENV PROJECT_NAME=${{PROJECT_NAME}} PROJECT_VERSION=${{PROJECT_VERSION}}

WORKDIR {RUNTIME_BIN_DIR}
ENTRYPOINT ["{binary}"]
"#,
            binary = self.binary_path(),
        )
    }

    fn binary_path(&self) -> String {
        container_path(&[RUNTIME_BIN_DIR, self.command])
    }
}

fn build_stage(config: &DockerConfig) -> String {
    format!(
        "FROM {image} AS build-env\n\nFROM build-env AS {BUILDER_STAGE}\n",
        image = config.build_image,
    )
}

fn goproxy_arg(config: &DockerConfig) -> String {
    format!("ARG GOPROXY={host}\n", host = config.go_proxy.host)
}

fn runtime_stage(config: &DockerConfig) -> String {
    format!("# runtime\nFROM {image}\n", image = config.runtime_image)
}
