//! Declarative request rewrites.
//!
//! Runs on the normalized request, before validation. Every rule that fires
//! leaves a [`Decision`] behind; the decisions are informational only and
//! nothing downstream reads them back.

use tracing::debug;

use crate::domain::entities::diagnostics::{Decision, codes};
use crate::domain::request::{GenerateRequest, ServiceSpec};

/// First port handed out to injected or mapped services.
pub const BASE_SERVICE_PORT: i64 = 8081;

/// Services injected when a microservices request names none.
pub const DEFAULT_SERVICES: [&str; 2] = ["users", "orders"];

pub fn apply_rules(mut req: GenerateRequest) -> (GenerateRequest, Vec<Decision>) {
    let mut decisions = Vec::new();
    let microservices = req.architecture == "microservices";

    if microservices && req.services.is_empty() {
        req.services = sequential_services(DEFAULT_SERVICES.iter().copied());
        debug!(count = req.services.len(), "injected default services");
        decisions.push(Decision::new(
            codes::DEFAULT_SERVICES_INJECTED,
            "Injected default services for microservice architecture.",
            "architecture",
        ));
    }

    if microservices && !req.custom.add_service_names.is_empty() {
        req.services = sequential_services(req.custom.add_service_names.iter().map(String::as_str));
        debug!(count = req.services.len(), "mapped dynamic services");
        decisions.push(Decision::new(
            codes::DYNAMIC_SERVICES_MAPPED,
            "Mapped dynamic custom services to microservice array.",
            "custom.add_service_names",
        ));
    }

    if req.db == "none" && req.use_orm {
        req.use_orm = false;
        debug!("orm disabled, no database selected");
        decisions.push(Decision::new(
            codes::ORM_DISABLED_NO_DATABASE,
            "Disabled ORM generation since database was set to none.",
            "db",
        ));
    }

    (req, decisions)
}

fn sequential_services<'a>(names: impl Iterator<Item = &'a str>) -> Vec<ServiceSpec> {
    names
        .zip(BASE_SERVICE_PORT..)
        .map(|(name, port)| ServiceSpec::new(name, port))
        .collect()
}
