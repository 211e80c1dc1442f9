//! Integration tests for stackforge-core.
//!
//! The renderer here is a stub that names the template it was asked for and
//! carries both injection markers in entry points, so these tests exercise
//! the pipeline without depending on the real template set.

use serde_json::Value;
use stackforge_core::{
    domain::{DataField, DataModel, ServiceSpec, entities::codes},
    prelude::*,
};

struct StubRenderer;

impl TemplateRenderer for StubRenderer {
    fn render(&self, key: &str, _bindings: &Value) -> ForgeResult<String> {
        if key.ends_with("/main") {
            let c = if key.starts_with("python/") { "#" } else { "//" };
            Ok(format!("{key}\n{c} marker:imports\n{c} marker:routes\n"))
        } else {
            Ok(format!("{key}\n"))
        }
    }
}

fn service() -> GenerationService {
    GenerationService::new(Box::new(StubRenderer))
}

fn request(language: &str, framework: &str, architecture: &str) -> GenerateRequest {
    GenerateRequest {
        language: language.into(),
        framework: framework.into(),
        architecture: architecture.into(),
        ..Default::default()
    }
}

#[test]
fn every_language_generates_an_entry_point() {
    for (lang, fw, entry) in [
        ("go", "gin", "cmd/server/main.go"),
        ("node", "express", "src/index.js"),
        ("python", "fastapi", "app/main.py"),
        ("python", "django", "manage.py"),
    ] {
        let resp = service().generate(request(lang, fw, "clean")).unwrap();
        assert!(
            resp.file_paths.contains(&entry.to_string()),
            "{lang}/{fw} is missing {entry}"
        );
        assert!(resp.bash_script.starts_with("#!/usr/bin/env bash\nset -euo pipefail\n"));
    }
}

#[test]
fn microservice_counts_are_enforced() {
    for count in [1, 6] {
        let mut req = request("go", "gin", "microservices");
        req.services = (0..count)
            .map(|i| ServiceSpec {
                name: format!("svc{i}"),
                port: 9000 + i,
            })
            .collect();
        let err = service().generate(req).unwrap_err();
        assert_eq!(err.category(), stackforge_core::error::ErrorCategory::Validation);
    }
}

#[test]
fn duplicate_service_names_are_rejected() {
    let mut req = request("node", "express", "microservices");
    req.services = vec![
        ServiceSpec { name: "Users".into(), port: 8081 },
        ServiceSpec { name: "users".into(), port: 8082 },
    ];
    let err = service().generate(req).unwrap_err();
    assert!(err.to_string().contains("duplicate service name"));
}

#[test]
fn default_services_are_injected_and_reported() {
    let resp = service().generate(request("python", "fastapi", "microservices")).unwrap();
    assert!(resp.file_paths.contains(&"services/users/app/main.py".to_string()));
    assert!(resp.file_paths.contains(&"services/orders/app/main.py".to_string()));
    assert!(resp
        .decisions
        .iter()
        .any(|d| d.code == codes::DEFAULT_SERVICES_INJECTED && d.triggered_by == "architecture"));
}

#[test]
fn models_are_wired_per_service() {
    let mut req = request("node", "fastify", "microservices");
    req.custom.models = vec![DataModel {
        name: "order_line".into(),
        fields: vec![DataField::new("qty", "int")],
    }];
    let resp = service().generate(req).unwrap();
    for svc in ["users", "orders"] {
        assert!(resp.file_paths.contains(&format!("services/{svc}/src/routes/orderlines.js")));
    }
    assert!(resp
        .bash_script
        .contains("app.register(orderlineRoutes, { prefix: '/orderlines' });"));
}

#[test]
fn warnings_are_sorted_by_severity_then_code() {
    let mut req = request("python", "django", "mvp");
    req.db = "postgresql".into();
    req.use_orm = true;
    req.custom.add_files = vec![stackforge_core::domain::CustomFile {
        path: "manage.py".into(),
        content: "print('mine')\n".into(),
    }];
    let resp = service().generate(req).unwrap();
    let seen: Vec<_> = resp.warnings.iter().map(|w| w.code.as_str()).collect();
    assert_eq!(seen, vec![codes::DUPLICATE_CUSTOM_FILE, codes::DJANGO_BUILTIN_ORM]);
    assert_eq!(resp.warnings[0].severity, Severity::Warn);
}

#[test]
fn file_paths_are_sorted_and_dirs_marked() {
    let resp = service().generate(request("go", "fiber", "hexagonal")).unwrap();
    let mut sorted = resp.file_paths.clone();
    sorted.sort();
    assert_eq!(resp.file_paths, sorted);
    assert!(resp.file_paths.contains(&"internal/".to_string()));
}

#[test]
fn response_serializes_with_wire_names() {
    let resp = service().generate(request("go", "gin", "mvp")).unwrap();
    let json = serde_json::to_value(&resp).unwrap();
    for key in [
        "bash_script",
        "powershell_script",
        "file_paths",
        "warnings",
        "decisions",
        "complexity_report",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["complexity_report"]["risk_level"], "low");
}
