//! Per-variable value rewrites.

use url::Url;

use crate::template::variables::Transform;

/// Let's Encrypt staging directory.
pub const STAGING_CA_URL: &str = "https://acme-staging.api.letsencrypt.org/directory";

/// Let's Encrypt production directory.
pub const PRODUCTION_CA_URL: &str = "https://acme-v01.api.letsencrypt.org/directory";

impl Transform {
    /// Rewrite a raw environment value.
    pub fn apply(self, raw: &str) -> String {
        match self {
            Transform::Verbatim => raw.to_string(),
            Transform::CertificateAuthority => certificate_authority(raw),
            Transform::QuotedList => quoted_list(raw),
        }
    }
}

fn certificate_authority(raw: &str) -> String {
    match raw {
        "staging" => STAGING_CA_URL.to_string(),
        "production" => PRODUCTION_CA_URL.to_string(),
        other => {
            if let Err(e) = Url::parse(other) {
                tracing::warn!(
                    value = %other,
                    error = %e,
                    "CA is neither staging, production nor a valid URL; using it verbatim"
                );
            }
            other.to_string()
        }
    }
}

fn quoted_list(raw: &str) -> String {
    let items: Vec<String> = raw.split(',').map(|item| format!("\"{}\"", item)).collect();
    items.join(", ")
}
