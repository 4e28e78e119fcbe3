//! Variable catalog.
//!
//! The fixed, ordered set of environment variables the entrypoint knows
//! about. Each name doubles as the placeholder token searched for in the
//! template file.

/// Value rewrite applied to a variable before substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Value is substituted as-is.
    Verbatim,
    /// `staging` / `production` map to ACME directory URLs, anything else passes through.
    CertificateAuthority,
    /// `a,b` becomes `"a", "b"`.
    QuotedList,
}

/// One recognized environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    /// Environment key and literal placeholder token.
    pub name: &'static str,
    /// Absence is fatal when set.
    pub required: bool,
    /// Operator-facing hint, only used in error messages.
    pub description: &'static str,
    /// Fallback for optional variables (see [`DefaultPolicy`](super::DefaultPolicy)).
    pub default_value: &'static str,
    pub transform: Transform,
}

impl VariableSpec {
    const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: true,
            description,
            default_value: "",
            transform: Transform::Verbatim,
        }
    }

    const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: false,
            description,
            default_value: "",
            transform: Transform::Verbatim,
        }
    }

    const fn with_default(mut self, default_value: &'static str) -> Self {
        self.default_value = default_value;
        self
    }

    const fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

const CATALOG: &[VariableSpec] = &[
    VariableSpec::required(
        "LETS_ENCRYPT_EMAIL",
        "An email address is required for LETS_ENCRYPT_EMAIL",
    ),
    VariableSpec::required(
        "LETS_ENCRYPT_CA",
        "Which CA to use, either staging or production. Default: staging",
    )
    .with_default("staging")
    .with_transform(Transform::CertificateAuthority),
    VariableSpec::required(
        "TLD",
        "TLD is required for use as main domain on certificate, ex: domain.com",
    ),
    VariableSpec::required(
        "SANS",
        "SANS is required as comma separated list of FQDNs to list on SAN certificate, ex: app.domain.com,other.domain.com",
    )
    .with_transform(Transform::QuotedList),
    VariableSpec::optional(
        "DNS_PROVIDER",
        "Which supported DNS provider to use with Lets Encrypt for validation. You must also set env vars for any other values the DNS provider needs",
    )
    .with_default("cloudflare"),
    VariableSpec::required("BACKEND1_URL", "Url to first backend, ex: http://app:80"),
    VariableSpec::required(
        "FRONTEND1_DOMAIN",
        "Domain for first frontend, ex: app.domain.com",
    ),
    VariableSpec::optional("BACKEND2_URL", "Url to second backend, ex: http://other:80"),
    VariableSpec::optional(
        "FRONTEND2_DOMAIN",
        "Domain for second frontend, ex: otherapp.domain.com",
    ),
    VariableSpec::optional("BACKEND3_URL", "Url to third backend, ex: http://third:80"),
    VariableSpec::optional(
        "FRONTEND3_DOMAIN",
        "Domain for third frontend, ex: thirdapp.domain.com",
    ),
];

/// Returns the fixed catalog in validation order.
pub fn list_variables() -> &'static [VariableSpec] {
    CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_stable() {
        assert_eq!(list_variables(), list_variables());
        assert_eq!(list_variables().len(), 11);
        assert_eq!(list_variables()[0].name, "LETS_ENCRYPT_EMAIL");
    }

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = list_variables().iter().map(|v| v.name).collect();
        assert_eq!(names.len(), list_variables().len());
    }

    #[test]
    fn test_six_required() {
        let required: Vec<_> = list_variables()
            .iter()
            .filter(|v| v.required)
            .map(|v| v.name)
            .collect();
        assert_eq!(
            required,
            vec![
                "LETS_ENCRYPT_EMAIL",
                "LETS_ENCRYPT_CA",
                "TLD",
                "SANS",
                "BACKEND1_URL",
                "FRONTEND1_DOMAIN"
            ]
        );
    }

    #[test]
    fn test_only_ca_and_sans_transform() {
        for var in list_variables() {
            let expected = match var.name {
                "LETS_ENCRYPT_CA" => Transform::CertificateAuthority,
                "SANS" => Transform::QuotedList,
                _ => Transform::Verbatim,
            };
            assert_eq!(var.transform, expected, "{}", var.name);
        }
    }

    #[test]
    fn test_dns_provider_default() {
        let dns = list_variables()
            .iter()
            .find(|v| v.name == "DNS_PROVIDER")
            .unwrap();
        assert!(!dns.required);
        assert_eq!(dns.default_value, "cloudflare");
    }
}
