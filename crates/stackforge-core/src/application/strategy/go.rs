//! Go (gin / fiber) strategy.

use std::fmt::Write as _;

use tracing::{debug, instrument};

use super::{
    LanguageStrategy,
    shared::{self, DevToolsProfile, InfraProfile, ModelArtifact, Payload},
};
use crate::{
    application::services::{
        context::{GenerationContext, Unit, go_module},
        script::{Shell, bash_quote, powershell_quote},
    },
    domain::{
        Architecture, Blueprint, Database, Framework, ResolvedModel, Toggle,
        entities::model::placeholder_model,
    },
    error::ForgeResult,
};

const ENTRY: &str = "cmd/server/main.go";

// ── Per-model artifacts ──────────────────────────────────────────────────────

const CLEAN: &[ModelArtifact] = &[
    ModelArtifact { key: "go/clean/model_domain", path: "internal/domain/{lower}.go" },
    ModelArtifact { key: "go/clean/model_usecase", path: "internal/usecase/{lower}_usecase.go" },
    ModelArtifact { key: "go/clean/model_repository", path: "internal/repository/{lower}_repository.go" },
    ModelArtifact { key: "go/clean/model_handler", path: "internal/delivery/http/{lower}_handler.go" },
];

const HEXAGONAL: &[ModelArtifact] = &[
    ModelArtifact { key: "go/hexagonal/model_port", path: "internal/core/ports/{lower}_port.go" },
    ModelArtifact { key: "go/hexagonal/model_service", path: "internal/core/services/{lower}_service.go" },
    ModelArtifact { key: "go/hexagonal/model_handler", path: "internal/adapters/primary/http/{lower}_handler.go" },
    ModelArtifact { key: "go/hexagonal/model_adapter", path: "internal/adapters/secondary/database/{lower}_adapter.go" },
];

const MODULAR: &[ModelArtifact] = &[
    ModelArtifact { key: "go/modular/model_http", path: "internal/modules/{lower}/http.go" },
    ModelArtifact { key: "go/modular/model_service", path: "internal/modules/{lower}/service.go" },
    ModelArtifact { key: "go/modular/model_repository", path: "internal/modules/{lower}/repository.go" },
];

const HANDLER: &[ModelArtifact] = &[ModelArtifact {
    key: "go/mvp/model_handler",
    path: "internal/handlers/{lower}_handler.go",
}];

fn model_artifacts(arch: Architecture) -> &'static [ModelArtifact] {
    match arch {
        Architecture::Clean => CLEAN,
        Architecture::Hexagonal => HEXAGONAL,
        Architecture::ModularMonolith => MODULAR,
        Architecture::Mvp | Architecture::Microservices => HANDLER,
    }
}

/// Import lines and route statements that wire `model` into `main.go`.
fn wiring(bp: &Blueprint, module: &str, model: &ResolvedModel) -> (String, String) {
    let n = &model.name;
    let l = model.lower();
    match bp.architecture {
        Architecture::Clean => (
            format!(
                "\t\"{module}/internal/delivery/http\"\n\t\"{module}/internal/repository\"\n\t\"{module}/internal/usecase\""
            ),
            format!("\thttp.New{n}Handler(usecase.New{n}Usecase(repository.New{n}Repository())).Register(router)"),
        ),
        Architecture::Hexagonal => (
            format!(
                "\thttpPrimary \"{module}/internal/adapters/primary/http\"\n\t\"{module}/internal/adapters/secondary/database\"\n\t\"{module}/internal/core/services\""
            ),
            format!("\thttpPrimary.New{n}Handler(services.New{n}Service(database.New{n}Adapter())).Register(router)"),
        ),
        Architecture::ModularMonolith => (
            format!("\t\"{module}/internal/modules/{l}\""),
            format!("\t{l}.Register(router, {l}.NewService({l}.NewRepository()))"),
        ),
        Architecture::Mvp | Architecture::Microservices => {
            let routes = match bp.framework {
                Framework::Fiber => format!(
                    "\tapp.Get(\"/{l}s\", handlers.List{n}s)\n\tapp.Post(\"/{l}s\", handlers.Create{n})"
                ),
                _ => format!(
                    "\tr.GET(\"/{l}s\", handlers.List{n}s)\n\tr.POST(\"/{l}s\", handlers.Create{n})"
                ),
            };
            (format!("\t\"{module}/internal/handlers\""), routes)
        }
    }
}

// ── Manifests and fixed files ────────────────────────────────────────────────

/// `go.mod` for one unit.
pub fn go_mod(bp: &Blueprint, module: &str, with_config: bool) -> String {
    let mut deps = vec![match bp.framework {
        Framework::Fiber => "github.com/gofiber/fiber/v2 v2.52.6",
        _ => "github.com/gin-gonic/gin v1.10.0",
    }];
    deps.push("github.com/google/uuid v1.6.0");
    let orm = bp.use_orm;
    match bp.database {
        Database::Postgresql if orm => {
            deps.extend(["gorm.io/gorm v1.25.12", "gorm.io/driver/postgres v1.5.11"])
        }
        Database::Postgresql => deps.push("github.com/jackc/pgx/v5 v5.7.1"),
        Database::Mysql if orm => deps.extend(["gorm.io/gorm v1.25.12", "gorm.io/driver/mysql v1.5.7"]),
        Database::Mysql => deps.push("github.com/go-sql-driver/mysql v1.8.1"),
        Database::Mongodb => deps.push("go.mongodb.org/mongo-driver v1.17.1"),
        Database::None => {}
    }
    if with_config {
        deps.push("github.com/kelseyhightower/envconfig v1.4.0");
    }
    if bp.communication.is_grpc() {
        deps.extend(["google.golang.org/grpc v1.69.2", "google.golang.org/protobuf v1.36.1"]);
    }

    let mut b = format!("module {module}\n\ngo 1.23\n\nrequire (\n");
    for dep in deps {
        let _ = writeln!(b, "\t{dep}");
    }
    b.push_str(")\n");
    b
}

const DOCKERFILE: &str = "FROM golang:1.23-alpine AS build\nWORKDIR /app\nCOPY . .\nRUN go mod tidy && CGO_ENABLED=0 GOOS=linux go build -a -installsuffix cgo -o app ./cmd/server\n\nFROM scratch\nWORKDIR /app\nCOPY --from=build /etc/ssl/certs/ca-certificates.crt /etc/ssl/certs/\nCOPY --from=build /app/app .\nEXPOSE 8080\nCMD [\"./app\"]\n";

const REDIS_CACHE: &str = "package cache\n\nimport \"os\"\n\ntype RedisCache struct {\n\tAddr string\n}\n\nfunc NewRedisCache() *RedisCache {\n\taddr := os.Getenv(\"REDIS_ADDR\")\n\tif addr == \"\" {\n\t\taddr = \"redis:6379\"\n\t}\n\treturn &RedisCache{Addr: addr}\n}\n\nfunc (r *RedisCache) Ping() string {\n\treturn \"redis configured at \" + r.Addr\n}\n";

const KAFKA_PRODUCER: &str = "package messaging\n\nimport \"os\"\n\ntype KafkaProducer struct {\n\tBrokers string\n}\n\nfunc NewKafkaProducer() *KafkaProducer {\n\tb := os.Getenv(\"KAFKA_BROKERS\")\n\tif b == \"\" {\n\t\tb = \"kafka:9092\"\n\t}\n\treturn &KafkaProducer{Brokers: b}\n}\n\nfunc (p *KafkaProducer) Publish(topic, payload string) string {\n\treturn \"publish stub to \" + topic + \" via \" + p.Brokers + \" payload=\" + payload\n}\n";

const KAFKA_CONSUMER: &str = "package messaging\n\nimport \"os\"\n\ntype KafkaConsumer struct {\n\tBrokers string\n}\n\nfunc NewKafkaConsumer() *KafkaConsumer {\n\tb := os.Getenv(\"KAFKA_BROKERS\")\n\tif b == \"\" {\n\t\tb = \"kafka:9092\"\n\t}\n\treturn &KafkaConsumer{Brokers: b}\n}\n\nfunc (c *KafkaConsumer) Subscribe(topic string) string {\n\treturn \"consumer stub subscribed to \" + topic + \" via \" + c.Brokers\n}\n";

const GITIGNORE: &str = "bin/\nobj/\n.env\n.DS_Store\nnode_modules/\nvendor/\n__pycache__/\n*.sqlite3\n";

const CI_STEPS: &str = "      - uses: actions/setup-go@v5\n        with:\n          go-version: '1.23'\n      - run: go test ./...\n";

// ── Strategy ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoStrategy;

impl GoStrategy {
    fn unit_architecture(&self, ctx: &mut GenerationContext<'_>, unit: &Unit) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let base = shared::unit_bindings(ctx, unit);
        let dir = bp.architecture.template_dir();

        ctx.render_to(&unit.path(ENTRY), &format!("go/{dir}/main"), &base)?;
        if !bp.crud() {
            let artifacts = model_artifacts(bp.architecture);
            shared::render_model_artifacts(ctx, unit, &base, &placeholder_model(), artifacts)?;
        }

        let with_config = !unit.is_service && bp.enabled(Toggle::ConfigLoader);
        ctx.add_file(&unit.path("go.mod"), go_mod(bp, &unit.module, with_config));

        if !unit.is_service {
            if with_config {
                ctx.render_to("internal/config/config.go", "go/common/config", &base)?;
            }
            if bp.features.logger || bp.enabled(Toggle::Logger) {
                ctx.render_to("internal/logger/logger.go", "go/common/logger", &base)?;
            }
            if bp.features.global_error_handler {
                ctx.render_to("internal/middleware/error.go", "go/common/error_middleware", &base)?;
            }
            if bp.features.sample_test {
                ctx.render_to("internal/handlers/item_handler_test.go", "go/common/sample_test", &base)?;
            }
        }

        shared::render_all(
            ctx,
            unit,
            &base,
            &[
                ("go/common/request_id", "internal/middleware/requestid.go"),
                ("go/common/request_logger", "internal/middleware/requestlogger.go"),
                ("go/common/pagination", "internal/pagination/pagination.go"),
            ],
        )?;
        if bp.database.is_some() {
            ctx.render_to(&unit.path("internal/db/retry.go"), "go/common/db_retry", &base)?;
        }
        if bp.enabled(Toggle::BaseRoute) {
            ctx.render_to(&unit.path("internal/routes/base.go"), "go/common/base_route", &base)?;
        }
        if bp.enabled(Toggle::HealthCheck) || bp.features.health_endpoint {
            ctx.render_to(&unit.path("internal/health/handler.go"), "go/common/health", &base)?;
        }
        if bp.features.jwt_auth {
            ctx.render_to(&unit.path("internal/auth/jwt.go"), "go/common/jwt", &base)?;
        }
        if bp.communication.is_grpc() {
            shared::render_all(
                ctx,
                unit,
                &base,
                &[
                    ("go/common/grpc_server", "internal/grpc/server/server.go"),
                    ("go/common/grpc_client", "internal/grpc/client/client.go"),
                ],
            )?;
        }
        Ok(())
    }

    fn unit_models(&self, ctx: &mut GenerationContext<'_>, unit: &Unit) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let base = shared::unit_bindings(ctx, unit);

        if bp.database.is_some() {
            ctx.render_to(&unit.path("internal/db/connection.go"), "go/common/db_connection", &base)?;
            if bp.use_orm && bp.database.is_sql() {
                ctx.render_to(&unit.path("internal/models/models.go"), "go/common/orm_models", &base)?;
            } else {
                ctx.render_to(&unit.path("internal/models/item.go"), "go/common/item_model", &base)?;
            }
            if !unit.is_service {
                ctx.render_to("cmd/seeder/main.go", "go/common/seeder", &base)?;
            }
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
            let (import, route) = wiring(bp, &unit.module, model);
            imports.push(import);
            routes.push(route);
            debug!(model = %model.name, unit = %unit.name, "model artifacts rendered");
        }
        shared::inject_entry(ctx, unit, ENTRY, &imports, &routes);
        Ok(())
    }
}

impl LanguageStrategy for GoStrategy {
    #[instrument(skip_all, fields(language = "go"))]
    fn generate_architecture(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        for unit in ctx.units() {
            self.unit_architecture(ctx, &unit)?;
        }
        if ctx.blueprint.communication.is_grpc() && !ctx.blueprint.architecture.is_microservices() {
            shared::add_proto_contract(ctx);
        }
        Ok(())
    }

    #[instrument(skip_all, fields(language = "go"))]
    fn generate_models(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        for unit in ctx.units() {
            self.unit_models(ctx, &unit)?;
        }
        shared::add_database_scripts(ctx);
        Ok(())
    }

    #[instrument(skip_all, fields(language = "go"))]
    fn generate_infra(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        shared::generate_infra(
            ctx,
            &InfraProfile {
                cache: &[("internal/cache/redis.go", REDIS_CACHE)],
                broker: &[
                    ("internal/messaging/kafka_producer.go", KAFKA_PRODUCER),
                    ("internal/messaging/kafka_consumer.go", KAFKA_CONSUMER),
                ],
                dockerfile: DOCKERFILE,
            },
        )
    }

    #[instrument(skip_all, fields(language = "go"))]
    fn generate_dev_tools(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let mut make_extra = String::new();
        if bp.database.is_some() {
            make_extra.push_str("\nmigrate-up:\n\t@echo \"Running migrations up\"\n\t# migrate -path migrations -database \"$$DATABASE_URL\" up\n");
            make_extra.push_str("\nmigrate-down:\n\t@echo \"Running migrations down\"\n\t# migrate -path migrations -database \"$$DATABASE_URL\" down\n");
            if !bp.architecture.is_microservices() {
                make_extra.push_str("\nseed:\n\t@echo \"Running seeder\"\n\tgo run cmd/seeder/main.go\n");
            }
        }
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

    fn init_command(&self, blueprint: &Blueprint, shell: Shell) -> String {
        let module = go_module(blueprint);
        match shell {
            Shell::Bash => format!("go mod init {}\n", bash_quote(&module)),
            Shell::PowerShell => format!("go mod init {}\n", powershell_quote(&module)),
        }
    }
}
