//! Node.js (express / fastify) strategy.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    LanguageStrategy,
    shared::{self, DevToolsProfile, InfraProfile, ModelArtifact, Payload},
};
use crate::{
    application::{
        ApplicationError,
        services::{
            context::{GenerationContext, Unit},
            script::Shell,
        },
    },
    domain::{Architecture, Blueprint, Database, Framework, ResolvedModel, Toggle},
    error::ForgeResult,
};

const ENTRY: &str = "src/index.js";

const CLEAN_PING: &[(&str, &str)] = &[
    ("node/clean/ping_domain", "src/domain/ping.js"),
    ("node/clean/ping_usecase", "src/usecases/pingUsecase.js"),
    ("node/clean/ping_controller", "src/controllers/pingController.js"),
    ("node/clean/ping_repository", "src/repositories/pingRepository.js"),
];

const HEXAGONAL_PING: &[(&str, &str)] = &[
    ("node/hexagonal/ping_port", "src/core/ports/pingPort.js"),
    ("node/hexagonal/ping_service", "src/core/services/pingService.js"),
    ("node/hexagonal/ping_controller", "src/adapters/primary/http/pingController.js"),
    ("node/hexagonal/ping_adapter", "src/adapters/secondary/database/pingAdapter.js"),
];

const CLEAN: &[ModelArtifact] = &[
    ModelArtifact { key: "node/clean/model_domain", path: "src/domain/{lower}.js" },
    ModelArtifact { key: "node/clean/model_usecase", path: "src/usecases/list{Name}s.js" },
    ModelArtifact { key: "node/clean/model_controller", path: "src/controllers/{lower}Controller.js" },
    ModelArtifact { key: "node/clean/model_repository", path: "src/repositories/{lower}Repository.js" },
];

const HEXAGONAL: &[ModelArtifact] = &[
    ModelArtifact { key: "node/hexagonal/model_port", path: "src/core/ports/{lower}RepositoryPort.js" },
    ModelArtifact { key: "node/hexagonal/model_service", path: "src/core/services/{lower}Service.js" },
    ModelArtifact { key: "node/hexagonal/model_controller", path: "src/adapters/primary/http/{lower}Controller.js" },
    ModelArtifact { key: "node/hexagonal/model_adapter", path: "src/adapters/secondary/database/{lower}RepositoryAdapter.js" },
];

const ROUTES: &[ModelArtifact] = &[ModelArtifact {
    key: "node/default/model_routes",
    path: "src/routes/{lower}s.js",
}];

fn model_artifacts(arch: Architecture) -> &'static [ModelArtifact] {
    match arch {
        Architecture::Clean => CLEAN,
        Architecture::Hexagonal => HEXAGONAL,
        _ => ROUTES,
    }
}

fn wiring(bp: &Blueprint, model: &ResolvedModel) -> (String, String) {
    let n = &model.name;
    let l = model.lower();
    match bp.architecture {
        Architecture::Clean => (
            format!("import * as {l}Controller from './controllers/{l}Controller.js';"),
            format!(
                "app.get('/{l}s', {l}Controller.list{n}sHandler);\napp.post('/{l}s', {l}Controller.create{n}Handler);"
            ),
        ),
        Architecture::Hexagonal => (
            format!("import {{ list{n}s, get{n}, create{n} }} from './adapters/primary/http/{l}Controller.js';"),
            format!("app.get('/{l}s', list{n}s);\napp.get('/{l}s/:id', get{n});\napp.post('/{l}s', create{n});"),
        ),
        _ => {
            let route = match bp.framework {
                Framework::Fastify => format!("app.register({l}Routes, {{ prefix: '/{l}s' }});"),
                _ => format!("app.use('/{l}s', {l}Routes);"),
            };
            (format!("import {l}Routes from './routes/{l}s.js';"), route)
        }
    }
}

// ── package.json ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PackageJson {
    name: String,
    version: &'static str,
    private: bool,
    #[serde(rename = "type")]
    module_type: &'static str,
    scripts: BTreeMap<&'static str, &'static str>,
    dependencies: BTreeMap<&'static str, &'static str>,
    #[serde(rename = "devDependencies", skip_serializing_if = "BTreeMap::is_empty")]
    dev_dependencies: BTreeMap<&'static str, &'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prisma: Option<PrismaConfig>,
}

#[derive(Debug, Serialize)]
struct PrismaConfig {
    seed: &'static str,
}

/// `package.json` for one unit.
pub fn package_json(bp: &Blueprint, unit: &Unit) -> ForgeResult<String> {
    let orm = bp.use_orm && bp.database.is_sql();
    let seed = if orm { "node prisma/seed.js" } else { "node scripts/seed.js" };

    let mut dependencies = BTreeMap::from([
        (bp.framework.as_str(), "^5.0.0"),
        ("dotenv", "^16.4.5"),
        ("zod", "^3.23.8"),
    ]);
    let mut dev_dependencies = BTreeMap::new();
    match bp.database {
        Database::Postgresql | Database::Mysql if orm => {
            dependencies.insert("@prisma/client", "^6.2.1");
            dev_dependencies.insert("prisma", "^6.2.1");
        }
        Database::Postgresql => {
            dependencies.insert("pg", "^8.13.3");
        }
        Database::Mysql => {
            dependencies.insert("mysql2", "^3.12.0");
        }
        Database::Mongodb => {
            dependencies.insert("mongodb", "^6.12.0");
        }
        Database::None => {}
    }

    let manifest = PackageJson {
        name: if unit.is_service {
            unit.name.clone()
        } else {
            "stackforge-generated".into()
        },
        version: "1.0.0",
        private: true,
        module_type: "module",
        scripts: BTreeMap::from([
            ("dev", "node src/index.js"),
            ("seed", seed),
            ("start", "node src/index.js"),
            ("test", "node --test"),
        ]),
        dependencies,
        dev_dependencies,
        prisma: orm.then_some(PrismaConfig { seed }),
    };

    serde_json::to_string_pretty(&manifest)
        .map(|json| json + "\n")
        .map_err(|e| {
            ApplicationError::Serialization {
                artifact: "package.json",
                reason: e.to_string(),
            }
            .into()
        })
}

// ── Fixed files ──────────────────────────────────────────────────────────────

const DOCKERFILE: &str = "FROM node:22-alpine AS deps\nWORKDIR /app\nCOPY package*.json ./\nRUN npm ci\n\nFROM node:22-alpine AS runner\nWORKDIR /app\nENV NODE_ENV=production\nCOPY --from=deps /app/node_modules ./node_modules\nCOPY . .\nEXPOSE 8080\nCMD [\"npm\", \"start\"]\n";

const REDIS_CACHE: &str = "export class RedisCache {\n  constructor(addr = process.env.REDIS_ADDR || 'redis:6379') {\n    this.addr = addr;\n  }\n\n  ping() {\n    return `redis configured at ${this.addr}`;\n  }\n}\n";

const KAFKA_PRODUCER: &str = "export class KafkaProducer {\n  constructor(brokers = process.env.KAFKA_BROKERS || 'kafka:9092') {\n    this.brokers = brokers;\n  }\n\n  publish(topic, payload) {\n    return `publish stub to ${topic} via ${this.brokers}: ${payload}`;\n  }\n}\n";

const KAFKA_CONSUMER: &str = "export class KafkaConsumer {\n  constructor(brokers = process.env.KAFKA_BROKERS || 'kafka:9092') {\n    this.brokers = brokers;\n  }\n\n  subscribe(topic) {\n    return `consumer stub subscribed to ${topic} via ${this.brokers}`;\n  }\n}\n";

const GITIGNORE: &str = "bin/\nobj/\n.env\n.DS_Store\nnode_modules/\nvendor/\n__pycache__/\n*.sqlite3\n";

const CI_STEPS: &str = "      - uses: actions/setup-node@v4\n        with:\n          node-version: '22'\n      - run: npm test\n";

// ── Strategy ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStrategy;

impl NodeStrategy {
    fn unit_architecture(&self, ctx: &mut GenerationContext<'_>, unit: &Unit) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let base = shared::unit_bindings(ctx, unit);

        ctx.render_to(
            &unit.path(ENTRY),
            &format!("node/{}/main", bp.architecture.template_dir()),
            &base,
        )?;
        if !bp.crud() {
            let ping: &[(&str, &str)] = match bp.architecture {
                Architecture::Clean => CLEAN_PING,
                Architecture::Hexagonal => HEXAGONAL_PING,
                _ => &[],
            };
            shared::render_all(ctx, unit, &base, ping)?;
        }
        ctx.add_file(&unit.path("package.json"), package_json(bp, unit)?);

        if !unit.is_service {
            if bp.enabled(Toggle::ConfigLoader) {
                ctx.render_to("src/config/index.js", "node/common/config", &base)?;
            }
            if bp.features.logger || bp.enabled(Toggle::Logger) {
                ctx.render_to("src/logger/index.js", "node/common/logger", &base)?;
            }
            if bp.features.global_error_handler {
                ctx.render_to("src/middleware/error.js", "node/common/error_middleware", &base)?;
            }
            if bp.features.sample_test {
                ctx.render_to("tests/items.test.js", "node/common/sample_test", &base)?;
            }
        }

        shared::render_all(
            ctx,
            unit,
            &base,
            &[
                ("node/common/request_id", "src/middleware/requestId.js"),
                ("node/common/request_logger", "src/middleware/requestLogger.js"),
                ("node/common/pagination", "src/utils/pagination.js"),
            ],
        )?;
        if bp.database.is_some() {
            ctx.render_to(&unit.path("src/db/retry.js"), "node/common/db_retry", &base)?;
        }
        if bp.enabled(Toggle::BaseRoute) {
            ctx.render_to(&unit.path("src/routes/base.js"), "node/common/base_route", &base)?;
        }
        if bp.enabled(Toggle::HealthCheck) || bp.features.health_endpoint {
            ctx.render_to(&unit.path("src/routes/health.js"), "node/common/health", &base)?;
        }
        if bp.features.jwt_auth {
            ctx.render_to(&unit.path("src/auth/jwt.js"), "node/common/jwt", &base)?;
        }
        if bp.communication.is_grpc() {
            shared::render_all(
                ctx,
                unit,
                &base,
                &[
                    ("node/common/grpc_server", "src/grpc/server.js"),
                    ("node/common/grpc_client", "src/grpc/client.js"),
                ],
            )?;
        }
        Ok(())
    }

    fn unit_models(&self, ctx: &mut GenerationContext<'_>, unit: &Unit) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let base = shared::unit_bindings(ctx, unit);

        if bp.database.is_sql() {
            let files: &[(&str, &str)] = if bp.use_orm {
                &[
                    ("node/db/prisma_schema", "prisma/schema.prisma"),
                    ("node/db/prisma_client", "src/db/prismaClient.js"),
                    ("node/db/prisma_seed", "prisma/seed.js"),
                ]
            } else {
                &[
                    ("node/db/sql_client", "src/db/sqlClient.js"),
                    ("node/db/sql_seed", "scripts/seed.js"),
                ]
            };
            shared::render_all(ctx, unit, &base, files)?;
        }

        if !bp.crud() {
            return Ok(());
        }

        let models = ctx.models().to_vec();
        let artifacts = model_artifacts(bp.architecture);
        let mut imports = Payload::default();
        let mut routes = Payload::default();
        for model in &models {
            shared::render_model_artifacts(ctx, unit, &base, model, artifacts)?;
            let (import, route) = wiring(bp, model);
            imports.push(import);
            routes.push(route);
            debug!(model = %model.name, unit = %unit.name, "model artifacts rendered");
        }
        shared::inject_entry(ctx, unit, ENTRY, &imports, &routes);
        Ok(())
    }
}

impl LanguageStrategy for NodeStrategy {
    #[instrument(skip_all, fields(language = "node"))]
    fn generate_architecture(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        for unit in ctx.units() {
            self.unit_architecture(ctx, &unit)?;
        }
        if ctx.blueprint.communication.is_grpc() && !ctx.blueprint.architecture.is_microservices() {
            shared::add_proto_contract(ctx);
        }
        Ok(())
    }

    #[instrument(skip_all, fields(language = "node"))]
    fn generate_models(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        for unit in ctx.units() {
            self.unit_models(ctx, &unit)?;
        }
        shared::add_database_scripts(ctx);
        Ok(())
    }

    #[instrument(skip_all, fields(language = "node"))]
    fn generate_infra(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        shared::generate_infra(
            ctx,
            &InfraProfile {
                cache: &[("src/cache/redis.js", REDIS_CACHE)],
                broker: &[
                    ("src/messaging/kafkaProducer.js", KAFKA_PRODUCER),
                    ("src/messaging/kafkaConsumer.js", KAFKA_CONSUMER),
                ],
                dockerfile: DOCKERFILE,
            },
        )
    }

    #[instrument(skip_all, fields(language = "node"))]
    fn generate_dev_tools(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let make_extra = match (bp.database.is_sql(), bp.use_orm) {
            (true, true) => "\nseed:\n\t@echo \"Running Prisma seeder\"\n\tnpx prisma db seed\n".into(),
            (true, false) => "\nseed:\n\t@echo \"Running raw SQL seed\"\n\tnode scripts/seed.js\n".into(),
            _ => String::new(),
        };
        shared::generate_dev_tools(
            ctx,
            &DevToolsProfile {
                gitignore: GITIGNORE,
                ci_steps: CI_STEPS,
                make_test: "@echo \"Run language-specific tests\"",
                make_extra,
            },
        );
        Ok(())
    }

    fn init_command(&self, _blueprint: &Blueprint, _shell: Shell) -> String {
        "npm init -y\n".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::strategy::test_support::{KeyEcho, blueprint};
    use crate::domain::{DataField, DataModel};

    fn run(bp: &Blueprint) -> crate::domain::FileTree {
        let renderer = KeyEcho;
        let mut ctx = GenerationContext::new(bp, &renderer);
        let s = NodeStrategy;
        s.generate_architecture(&mut ctx).unwrap();
        s.generate_models(&mut ctx).unwrap();
        s.generate_infra(&mut ctx).unwrap();
        s.generate_dev_tools(&mut ctx).unwrap();
        ctx.finish().0
    }

    fn models() -> Vec<DataModel> {
        vec![
            DataModel {
                name: "user".into(),
                fields: vec![DataField::new("email", "string")],
            },
            DataModel {
                name: "order".into(),
                fields: vec![DataField::new("total", "decimal")],
            },
        ]
    }

    #[test]
    fn fastify_routes_are_registered_with_prefix() {
        let bp = blueprint(|r| {
            r.language = "node".into();
            r.framework = "fastify".into();
            r.architecture = "mvp".into();
            r.custom.models = models();
        });
        let tree = run(&bp);
        assert!(tree.contains_file("src/routes/users.js"));
        assert!(tree.contains_file("src/routes/orders.js"));
        let main = tree.get(ENTRY).unwrap();
        assert!(main.contains(
            "// marker:imports\nimport userRoutes from './routes/users.js';\nimport orderRoutes from './routes/orders.js';\n"
        ));
        assert!(main.contains("app.register(orderRoutes, { prefix: '/orders' });\n"));
    }

    #[test]
    fn hexagonal_without_crud_gets_ping_set() {
        let bp = blueprint(|r| {
            r.language = "node".into();
            r.framework = "express".into();
            r.architecture = "hexagonal".into();
            r.file_toggles.example_crud = Some(false);
        });
        let tree = run(&bp);
        assert!(tree.contains_file("src/core/ports/pingPort.js"));
        assert!(!tree.contains_file("src/core/ports/itemRepositoryPort.js"));
    }

    #[test]
    fn prisma_files_only_with_orm_on_sql() {
        let bp = blueprint(|r| {
            r.language = "node".into();
            r.framework = "express".into();
            r.architecture = "clean".into();
            r.db = "postgresql".into();
            r.use_orm = true;
            r.features.makefile = true;
        });
        let tree = run(&bp);
        assert!(tree.contains_file("prisma/schema.prisma"));
        assert!(!tree.contains_file("src/db/sqlClient.js"));
        assert!(tree.get("Makefile").unwrap().contains("npx prisma db seed"));

        let pkg: serde_json::Value = serde_json::from_str(tree.get("package.json").unwrap()).unwrap();
        assert_eq!(pkg["dependencies"]["@prisma/client"], "^6.2.1");
        assert_eq!(pkg["devDependencies"]["prisma"], "^6.2.1");
        assert_eq!(pkg["scripts"]["seed"], "node prisma/seed.js");
        assert_eq!(pkg["type"], "module");
    }

    #[test]
    fn mongo_gets_no_sql_client() {
        let bp = blueprint(|r| {
            r.language = "node".into();
            r.framework = "express".into();
            r.architecture = "mvp".into();
            r.db = "mongodb".into();
        });
        let tree = run(&bp);
        assert!(!tree.contains_file("src/db/sqlClient.js"));
        assert!(tree.contains_file("src/db/retry.js"));
        let pkg: serde_json::Value = serde_json::from_str(tree.get("package.json").unwrap()).unwrap();
        assert_eq!(pkg["dependencies"]["mongodb"], "^6.12.0");
    }
}
