//! Dockerfile generation for Go services.
//!
//! # Generated layout
//!
//! ```text
//! FROM <build_image> AS build-env
//! FROM build-env AS builder
//!   ARG GOPROXY=...              (go_proxy.proxy_on)
//!   WORKDIR /go/src, COPY, RUN make build WORKSPACE=<workspace>
//! FROM <runtime_image>
//!   COPY --from=builder binary   /go/bin/<command>
//!   COPY openapi.json + docs/    (openapi)
//!   EXPOSE <port>...             (env vars with a value and expose = true)
//!   ARG/ENV PROJECT_NAME, PROJECT_VERSION
//!   ENTRYPOINT ["/go/bin/<command>"]
//! ```
//!
//! Rendering is a pure function of its inputs: the same configuration always
//! produces byte-identical output.

pub mod dockerfile;
pub mod output;
pub mod path;

pub use dockerfile::DockerfileGenerator;
