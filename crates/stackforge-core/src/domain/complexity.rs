//! Advisory complexity scoring.
//!
//! Never blocks and never mutates. Works on the normalized request rather
//! than a [`Blueprint`](crate::domain::validation::Blueprint) so that
//! `analyze` can score requests that would fail validation; unrecognized
//! values weigh nothing.

use crate::domain::entities::diagnostics::{ComplexityReport, ComplexityWeights, RiskLevel};
use crate::domain::entities::model::usable_models;
use crate::domain::request::GenerateRequest;

pub const MAX_SCORE: u32 = 100;
pub const HIGH_RISK_THRESHOLD: u32 = 55;
pub const MODERATE_RISK_THRESHOLD: u32 = 30;

const CACHE_WEIGHT: u32 = 5;
const BROKER_WEIGHT: u32 = 15;
const LIGHTWEIGHT_BROKER_WEIGHT: u32 = 10;
const GRPC_WEIGHT: u32 = 10;
const PER_EXTRA_SERVICE: u32 = 5;
const PER_EXTRA_MODEL: u32 = 3;

fn architecture_weight(arch: &str) -> u32 {
    match arch {
        "mvp" => 5,
        "modular-monolith" => 15,
        "clean" => 20,
        "hexagonal" => 25,
        "microservices" => 40,
        _ => 0,
    }
}

fn database_weight(db: &str) -> u32 {
    match db {
        "postgresql" | "mysql" => 10,
        "mongodb" => 8,
        _ => 0,
    }
}

fn count_above(count: usize, free: usize) -> u32 {
    u32::try_from(count.saturating_sub(free)).unwrap_or(u32::MAX)
}

pub fn analyze(req: &GenerateRequest) -> ComplexityReport {
    let microservices = req.architecture == "microservices";
    let grpc = req.service_communication == "grpc";
    let broker = req.infra.broker;

    let mut infrastructure = 0;
    if req.infra.cache {
        infrastructure += CACHE_WEIGHT;
    }
    if broker {
        infrastructure += BROKER_WEIGHT;
    }
    if req.infra.lightweight_broker {
        infrastructure += LIGHTWEIGHT_BROKER_WEIGHT;
    }
    if grpc {
        infrastructure += GRPC_WEIGHT;
    }

    let services = if microservices {
        PER_EXTRA_SERVICE.saturating_mul(count_above(req.services.len(), 2))
    } else {
        0
    };

    let weights = ComplexityWeights {
        architecture: architecture_weight(&req.architecture),
        database: database_weight(&req.db),
        infrastructure,
        services,
        models: PER_EXTRA_MODEL.saturating_mul(count_above(usable_models(&req.custom.models).len(), 3)),
    };

    let score = weights.total().min(MAX_SCORE);
    let risk_level = if score >= HIGH_RISK_THRESHOLD || (microservices && broker && grpc) {
        RiskLevel::High
    } else if score >= MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    let mut notes = Vec::new();
    if req.architecture == "mvp" && broker {
        notes.push("Action: Uncheck Kafka to drop 15 complexity points (excessive for MVP).".into());
    }
    if risk_level == RiskLevel::High && broker && grpc {
        notes.push(
            "Action: Switch from gRPC to HTTP (-10 pts) or remove Kafka (-15 pts) to drop to Moderate risk."
                .into(),
        );
    }
    if microservices && req.services.len() > 3 {
        let saved = count_above(req.services.len(), 3).saturating_mul(PER_EXTRA_SERVICE);
        notes.push(format!(
            "Action: Consolidate to 3 services to save {saved} complexity points."
        ));
    }
    if req.framework == "django" && microservices {
        notes.push(
            "Action: Django is traditionally monolithic. Consider FastAPI for microservices.".into(),
        );
    }

    ComplexityReport {
        score,
        weights,
        risk_level,
        notes,
    }
}
