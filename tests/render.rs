//! Template rendering against the fixture template.

use std::fs;

use pretty_assertions::assert_eq;
use proxy_entrypoint::config::TemplateConfig;
use proxy_entrypoint::lifecycle::render;
use proxy_entrypoint::template::transform::STAGING_CA_URL;
use proxy_entrypoint::template::{
    list_variables, missing_placeholders, DefaultPolicy, Environment, FileStore,
};
use proxy_entrypoint::EntrypointError;

mod common;

fn template_config(defaults: DefaultPolicy) -> TemplateConfig {
    TemplateConfig {
        defaults,
        ..TemplateConfig::default()
    }
}

#[test]
fn test_fixture_has_every_placeholder() {
    let missing = missing_placeholders(common::TEMPLATE.as_bytes(), list_variables()).unwrap();
    assert!(missing.is_empty(), "fixture lacks placeholders: {:?}", missing);
}

#[test]
fn test_required_placeholders_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::template_in(dir.path());
    let store = FileStore::new(&path);

    let applied = render(
        &store,
        &common::required_env(),
        &template_config(DefaultPolicy::Inert),
    )
    .unwrap();
    assert_eq!(applied, 6);

    let rendered = fs::read_to_string(&path).unwrap();
    for var in list_variables().iter().filter(|v| v.required) {
        assert!(
            !rendered.contains(var.name),
            "placeholder {} still present",
            var.name
        );
    }

    assert!(rendered.contains(r#"email = "test@testing.com""#));
    assert!(rendered.contains(&format!(r#"caServer = "{}""#, STAGING_CA_URL)));
    assert!(rendered.contains(r#"main = "testing.com""#));
    assert!(rendered.contains(r#"sans = ["test.testing.com", "another.testing.com"]"#));
    assert!(rendered.contains(r#"url = "http://app:80""#));
    assert!(rendered.contains(r#"rule = "Host:test.testing.com""#));
}

#[test]
fn test_unset_optional_placeholders_stay_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::template_in(dir.path());

    render(
        &FileStore::new(&path),
        &common::required_env(),
        &template_config(DefaultPolicy::Inert),
    )
    .unwrap();

    let rendered = fs::read_to_string(&path).unwrap();
    for name in [
        "DNS_PROVIDER",
        "BACKEND2_URL",
        "FRONTEND2_DOMAIN",
        "BACKEND3_URL",
        "FRONTEND3_DOMAIN",
    ] {
        assert!(rendered.contains(name), "{} should remain", name);
    }
}

#[test]
fn test_apply_policy_fills_dns_provider() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::template_in(dir.path());

    let applied = render(
        &FileStore::new(&path),
        &common::required_env(),
        &template_config(DefaultPolicy::Apply),
    )
    .unwrap();
    assert_eq!(applied, 7);

    let rendered = fs::read_to_string(&path).unwrap();
    assert!(rendered.contains(r#"dnsProvider = "cloudflare""#));
    assert!(rendered.contains(r#"url = "BACKEND2_URL""#));
}

#[test]
fn test_optional_pair_when_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::template_in(dir.path());

    let mut vars = common::required_vars();
    vars.push(("BACKEND2_URL", "http://other:80"));
    vars.push(("FRONTEND2_DOMAIN", "other.testing.com"));
    let env: Environment = vars.into_iter().collect();

    render(&FileStore::new(&path), &env, &TemplateConfig::default()).unwrap();

    let rendered = fs::read_to_string(&path).unwrap();
    assert!(rendered.contains(r#"url = "http://other:80""#));
    assert!(rendered.contains(r#"rule = "Host:other.testing.com""#));
    assert!(rendered.contains("BACKEND3_URL"));
}

#[test]
fn test_missing_required_leaves_template_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::template_in(dir.path());

    let env: Environment = common::required_vars()
        .into_iter()
        .filter(|(k, _)| *k != "FRONTEND1_DOMAIN")
        .collect();

    let err = render(&FileStore::new(&path), &env, &TemplateConfig::default()).unwrap_err();
    assert!(matches!(err, EntrypointError::Resolve(_)));
    assert!(err.to_string().contains("FRONTEND1_DOMAIN"));
    assert_eq!(fs::read_to_string(&path).unwrap(), common::TEMPLATE);
}

#[test]
fn test_render_is_idempotent_on_rendered_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::template_in(dir.path());
    let store = FileStore::new(&path);
    let config = TemplateConfig::default();

    render(&store, &common::required_env(), &config).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    render(&store, &common::required_env(), &config).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}
