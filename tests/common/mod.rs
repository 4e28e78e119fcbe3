//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use proxy_entrypoint::{CommandSpec, Environment};
use tokio::io::{AsyncReadExt, DuplexStream};

/// Template fixture containing a placeholder for every catalog variable.
pub const TEMPLATE: &str = include_str!("../fixtures/traefik.toml");

/// The six required variables, all set.
pub fn required_vars() -> Vec<(&'static str, &'static str)> {
    vec![
        ("LETS_ENCRYPT_EMAIL", "test@testing.com"),
        ("LETS_ENCRYPT_CA", "staging"),
        ("TLD", "testing.com"),
        ("SANS", "test.testing.com,another.testing.com"),
        ("BACKEND1_URL", "http://app:80"),
        ("FRONTEND1_DOMAIN", "test.testing.com"),
    ]
}

pub fn required_env() -> Environment {
    required_vars().into_iter().collect()
}

/// Copy the fixture into `dir` and return its path.
pub fn template_in(dir: &Path) -> PathBuf {
    let path = dir.join("traefik.toml");
    fs::write(&path, TEMPLATE).unwrap();
    path
}

/// `/bin/sh -c <script>`.
pub fn sh(script: &str) -> CommandSpec {
    ["/bin/sh", "-c", script].into_iter().collect()
}

/// Read everything the supervisor writes until the sink is dropped.
pub async fn read_all(mut reader: DuplexStream) -> String {
    let mut out = String::new();
    reader.read_to_string(&mut out).await.unwrap();
    out
}
