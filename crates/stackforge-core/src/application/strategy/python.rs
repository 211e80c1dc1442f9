//! Python (fastapi / django) strategy.
//!
//! FastAPI projects follow the same layering as the other languages:
//! per-model artifacts are rendered and wired into `app/main.py` through
//! the two markers. Django projects use the framework's own layout and its
//! built-in ORM, so they get a fixed file set and no per-model CRUD.

use tracing::{debug, instrument};

use super::{
    LanguageStrategy,
    shared::{self, DevToolsProfile, InfraProfile, ModelArtifact, Payload},
};
use crate::{
    application::services::{
        context::{GenerationContext, Unit},
        script::Shell,
    },
    domain::{
        Architecture, Blueprint, Database, Framework, ResolvedModel, Severity, Toggle, Warning,
        entities::codes,
    },
    error::ForgeResult,
};

const ENTRY: &str = "app/main.py";

const CLEAN_PING: &[(&str, &str)] = &[
    ("python/clean/ping_domain", "app/domain/ping.py"),
    ("python/clean/ping_usecase", "app/usecases/ping_usecase.py"),
    ("python/clean/ping_controller", "app/delivery/http/ping_controller.py"),
    ("python/clean/ping_repository", "app/repositories/ping_repository.py"),
];

const HEXAGONAL_PING: &[(&str, &str)] = &[
    ("python/hexagonal/ping_port", "app/core/ports/ping_port.py"),
    ("python/hexagonal/ping_service", "app/core/services/ping_service.py"),
    ("python/hexagonal/ping_controller", "app/adapters/primary/http/ping_controller.py"),
    ("python/hexagonal/ping_adapter", "app/adapters/secondary/database/ping_adapter.py"),
];

const CLEAN: &[ModelArtifact] = &[
    ModelArtifact { key: "python/clean/model_domain", path: "app/domain/{snake}.py" },
    ModelArtifact { key: "python/clean/model_usecase", path: "app/usecases/{snake}_usecase.py" },
    ModelArtifact { key: "python/clean/model_repository", path: "app/repositories/{snake}_repository.py" },
    ModelArtifact { key: "python/clean/model_controller", path: "app/delivery/http/{snake}_controller.py" },
];

const HEXAGONAL: &[ModelArtifact] = &[
    ModelArtifact { key: "python/hexagonal/model_port", path: "app/core/ports/{snake}_port.py" },
    ModelArtifact { key: "python/hexagonal/model_service", path: "app/core/services/{snake}_service.py" },
    ModelArtifact { key: "python/hexagonal/model_controller", path: "app/adapters/primary/http/{snake}_controller.py" },
    ModelArtifact { key: "python/hexagonal/model_adapter", path: "app/adapters/secondary/database/{snake}_adapter.py" },
];

const ROUTES: &[ModelArtifact] = &[
    ModelArtifact { key: "python/default/model_schema", path: "app/schemas/{snake}.py" },
    ModelArtifact { key: "python/default/model_routes", path: "app/routes/{snake}s.py" },
];

fn model_artifacts(arch: Architecture) -> &'static [ModelArtifact] {
    match arch {
        Architecture::Clean => CLEAN,
        Architecture::Hexagonal => HEXAGONAL,
        _ => ROUTES,
    }
}

fn wiring(arch: Architecture, model: &ResolvedModel) -> (String, String) {
    let s = model.snake();
    match arch {
        Architecture::Clean => (
            format!("from app.delivery.http.{s}_controller import router as {s}_router"),
            format!("app.include_router({s}_router)"),
        ),
        Architecture::Hexagonal => (
            format!("from app.adapters.primary.http.{s}_controller import {s}_router"),
            format!("app.include_router({s}_router)"),
        ),
        _ => (
            format!("from app.routes.{s}s import router as {s}s_router"),
            format!("app.include_router({s}s_router)"),
        ),
    }
}

// ── Manifests and fixed files ────────────────────────────────────────────────

/// `requirements.txt` for one unit.
pub fn requirements(bp: &Blueprint) -> String {
    let mut b = String::new();
    if bp.framework == Framework::Django {
        b.push_str("Django==5.1.5\ndjangorestframework==3.15.2\n");
        match bp.database {
            Database::Postgresql => b.push_str("psycopg[binary]==3.2.3\n"),
            Database::Mysql => b.push_str("mysqlclient==2.2.7\n"),
            Database::Mongodb => b.push_str("pymongo==4.10.1\n"),
            Database::None => {}
        }
        return b;
    }

    b.push_str("fastapi==0.116.0\nuvicorn==0.34.0\npydantic-settings==2.6.1\n");
    if bp.use_orm && bp.database.is_sql() {
        b.push_str("SQLAlchemy==2.0.36\nalembic==1.14.0\n");
    }
    match bp.database {
        Database::Postgresql => b.push_str("psycopg[binary]==3.2.3\n"),
        Database::Mysql => b.push_str("PyMySQL==1.1.1\n"),
        Database::Mongodb => b.push_str("pymongo==4.10.1\n"),
        Database::None => {}
    }
    if bp.features.jwt_auth {
        b.push_str("PyJWT==2.10.1\n");
    }
    if bp.communication.is_grpc() {
        b.push_str("grpcio==1.68.1\n");
    }
    if bp.features.sample_test {
        b.push_str("pytest==8.3.4\nhttpx==0.28.1\n");
    }
    b
}

const DOCKERFILE_FASTAPI: &str = "FROM python:3.11-slim\nWORKDIR /app\nCOPY requirements.txt .\nRUN pip install --no-cache-dir -r requirements.txt\nCOPY . .\nEXPOSE 8080\nCMD [\"uvicorn\", \"app.main:app\", \"--host\", \"0.0.0.0\", \"--port\", \"8080\"]\n";

const DOCKERFILE_DJANGO: &str = "FROM python:3.11-slim\nWORKDIR /app\nCOPY requirements.txt .\nRUN pip install --no-cache-dir -r requirements.txt\nCOPY . .\nEXPOSE 8080\nCMD [\"python\", \"manage.py\", \"runserver\", \"0.0.0.0:8080\"]\n";

const REDIS_CACHE: &str = "import os\n\n\nclass RedisCache:\n    def __init__(self, addr: str | None = None):\n        self.addr = addr or os.getenv('REDIS_ADDR', 'redis:6379')\n\n    def ping(self) -> str:\n        return f'redis configured at {self.addr}'\n";

const KAFKA_PRODUCER: &str = "import os\n\n\nclass KafkaProducer:\n    def __init__(self, brokers: str | None = None):\n        self.brokers = brokers or os.getenv('KAFKA_BROKERS', 'kafka:9092')\n\n    def publish(self, topic: str, payload: str) -> str:\n        return f'publish stub to {topic} via {self.brokers}: {payload}'\n";

const KAFKA_CONSUMER: &str = "import os\n\n\nclass KafkaConsumer:\n    def __init__(self, brokers: str | None = None):\n        self.brokers = brokers or os.getenv('KAFKA_BROKERS', 'kafka:9092')\n\n    def subscribe(self, topic: str) -> str:\n        return f'consumer stub subscribed to {topic} via {self.brokers}'\n";

const GITIGNORE: &str = "venv/\n__pycache__/\n*.pyc\n.env\n.DS_Store\n*.sqlite3\n.coverage\n";

const CI_STEPS: &str = "      - uses: actions/setup-python@v5\n        with:\n          python-version: '3.11'\n      - run: pip install -r requirements.txt pytest && pytest\n";

// ── Strategy ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PythonStrategy;

impl PythonStrategy {
    fn fastapi_architecture(&self, ctx: &mut GenerationContext<'_>, unit: &Unit) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let base = shared::unit_bindings(ctx, unit);

        ctx.render_to(
            &unit.path(ENTRY),
            &format!("python/{}/main", bp.architecture.template_dir()),
            &base,
        )?;
        ctx.add_file(&unit.path("app/__init__.py"), "");
        if !bp.crud() {
            let ping: &[(&str, &str)] = match bp.architecture {
                Architecture::Clean => CLEAN_PING,
                Architecture::Hexagonal => HEXAGONAL_PING,
                _ => &[],
            };
            shared::render_all(ctx, unit, &base, ping)?;
        }
        ctx.add_file(&unit.path("requirements.txt"), requirements(bp));

        if !unit.is_service {
            if bp.enabled(Toggle::ConfigLoader) {
                ctx.render_to("app/core/config.py", "python/common/config", &base)?;
            }
            if bp.features.logger || bp.enabled(Toggle::Logger) {
                ctx.render_to("app/core/logger.py", "python/common/logger", &base)?;
            }
            if bp.features.global_error_handler {
                ctx.render_to("app/middleware/error_handler.py", "python/common/error_middleware", &base)?;
            }
            if bp.features.sample_test {
                ctx.render_to("tests/test_items.py", "python/common/sample_test", &base)?;
            }
        }

        shared::render_all(
            ctx,
            unit,
            &base,
            &[
                ("python/common/request_id", "app/middleware/request_id.py"),
                ("python/common/request_logger", "app/middleware/request_logger.py"),
                ("python/common/pagination", "app/utils/pagination.py"),
            ],
        )?;
        if bp.database.is_some() {
            ctx.render_to(&unit.path("app/db/retry.py"), "python/common/db_retry", &base)?;
        }
        if bp.enabled(Toggle::BaseRoute) {
            ctx.render_to(&unit.path("app/routes/base.py"), "python/common/base_route", &base)?;
        }
        if bp.enabled(Toggle::HealthCheck) || bp.features.health_endpoint {
            ctx.render_to(&unit.path("app/routes/health.py"), "python/common/health", &base)?;
        }
        if bp.features.jwt_auth {
            ctx.render_to(&unit.path("app/auth/jwt.py"), "python/common/jwt", &base)?;
        }
        if bp.communication.is_grpc() {
            shared::render_all(
                ctx,
                unit,
                &base,
                &[
                    ("python/common/grpc_server", "app/grpc/server.py"),
                    ("python/common/grpc_client", "app/grpc/client.py"),
                ],
            )?;
        }
        Ok(())
    }

    fn django_architecture(&self, ctx: &mut GenerationContext<'_>, unit: &Unit) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let base = shared::unit_bindings(ctx, unit);

        shared::render_all(
            ctx,
            unit,
            &base,
            &[
                ("python/django/manage", "manage.py"),
                ("python/django/settings", "config/settings.py"),
                ("python/django/urls", "config/urls.py"),
                ("python/django/wsgi", "config/wsgi.py"),
                ("python/django/apps", "api/apps.py"),
                ("python/django/api_urls", "api/urls.py"),
                ("python/django/views", "api/views.py"),
                ("python/django/middleware", "api/middleware.py"),
                ("python/django/pagination", "api/pagination.py"),
            ],
        )?;
        ctx.add_file(&unit.path("config/__init__.py"), "");
        ctx.add_file(&unit.path("api/__init__.py"), "");
        ctx.add_file(&unit.path("requirements.txt"), requirements(bp));
        if !unit.is_service && bp.features.sample_test {
            ctx.render_to("api/tests.py", "python/django/tests", &base)?;
        }
        Ok(())
    }

    fn fastapi_models(&self, ctx: &mut GenerationContext<'_>, unit: &Unit) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let base = shared::unit_bindings(ctx, unit);

        if bp.database.is_sql() {
            let files: &[(&str, &str)] = if bp.use_orm {
                &[
                    ("python/db/sqlalchemy_session", "app/db/session.py"),
                    ("python/db/orm_models", "app/db/models.py"),
                    ("python/db/alembic_ini", "alembic.ini"),
                    ("python/db/alembic_env", "alembic/env.py"),
                    ("python/db/alembic_script_mako", "alembic/script.py.mako"),
                    ("python/db/seed", "scripts/seed.py"),
                ]
            } else {
                &[
                    ("python/db/sql_driver", "app/db/connection.py"),
                    ("python/db/seed", "scripts/seed.py"),
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
            let (import, route) = wiring(bp.architecture, model);
            imports.push(import);
            routes.push(route);
            debug!(model = %model.name, unit = %unit.name, "model artifacts rendered");
        }
        shared::inject_entry(ctx, unit, ENTRY, &imports, &routes);
        Ok(())
    }

    fn django_models(&self, ctx: &mut GenerationContext<'_>, unit: &Unit) -> ForgeResult<()> {
        if ctx.blueprint.database.is_sql() {
            let base = shared::unit_bindings(ctx, unit);
            ctx.render_to(&unit.path("api/models.py"), "python/django/models", &base)?;
        }
        Ok(())
    }
}

impl LanguageStrategy for PythonStrategy {
    #[instrument(skip_all, fields(language = "python"))]
    fn generate_architecture(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        let django = ctx.blueprint.framework == Framework::Django;
        for unit in ctx.units() {
            if django {
                self.django_architecture(ctx, &unit)?;
            } else {
                self.fastapi_architecture(ctx, &unit)?;
            }
        }
        if ctx.blueprint.communication.is_grpc() && !ctx.blueprint.architecture.is_microservices() {
            shared::add_proto_contract(ctx);
        }
        Ok(())
    }

    #[instrument(skip_all, fields(language = "python"))]
    fn generate_models(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        let django = ctx.blueprint.framework == Framework::Django;
        for unit in ctx.units() {
            if django {
                self.django_models(ctx, &unit)?;
            } else {
                self.fastapi_models(ctx, &unit)?;
            }
        }
        shared::add_database_scripts(ctx);
        Ok(())
    }

    #[instrument(skip_all, fields(language = "python"))]
    fn generate_infra(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        let dockerfile = match ctx.blueprint.framework {
            Framework::Django => DOCKERFILE_DJANGO,
            _ => DOCKERFILE_FASTAPI,
        };
        shared::generate_infra(
            ctx,
            &InfraProfile {
                cache: &[("app/cache/redis_cache.py", REDIS_CACHE)],
                broker: &[
                    ("app/messaging/kafka_producer.py", KAFKA_PRODUCER),
                    ("app/messaging/kafka_consumer.py", KAFKA_CONSUMER),
                ],
                dockerfile,
            },
        )
    }

    #[instrument(skip_all, fields(language = "python"))]
    fn generate_dev_tools(&self, ctx: &mut GenerationContext<'_>) -> ForgeResult<()> {
        let bp = ctx.blueprint;
        let mut make_extra = String::new();
        if bp.framework == Framework::Django {
            if bp.database.is_sql() {
                make_extra.push_str("\nmigrate-up:\n\tpython manage.py migrate\n");
            }
        } else if bp.database.is_sql() {
            if bp.use_orm {
                make_extra.push_str("\nmigrate-up:\n\talembic upgrade head\n");
            }
            make_extra.push_str("\nseed:\n\t@echo \"Running seeder\"\n\tpython scripts/seed.py\n");
        }
        shared::generate_dev_tools(
            ctx,
            &DevToolsProfile {
                gitignore: GITIGNORE,
                ci_steps: CI_STEPS,
                make_test: "pytest",
                make_extra,
            },
        );
        Ok(())
    }

    fn init_command(&self, _blueprint: &Blueprint, _shell: Shell) -> String {
        "python -m venv venv\n".into()
    }

    /// Activates the venv and installs every unit's `requirements.txt`.
    fn setup_command(&self, blueprint: &Blueprint, shell: Shell) -> String {
        let mut out = match shell {
            Shell::Bash => "source venv/bin/activate\n",
            Shell::PowerShell => ".\\venv\\Scripts\\Activate.ps1\n",
        }
        .to_string();

        if blueprint.architecture.is_microservices() {
            for svc in &blueprint.services {
                out.push_str(&format!("pip install -r services/{}/requirements.txt\n", svc.name));
            }
        } else {
            out.push_str("pip install -r requirements.txt\n");
        }
        out
    }

    fn config_warnings(&self, blueprint: &Blueprint) -> Vec<Warning> {
        if blueprint.framework == Framework::Django && blueprint.use_orm && blueprint.database.is_some() {
            vec![Warning::new(
                codes::DJANGO_BUILTIN_ORM,
                Severity::Info,
                "Django uses built-in ORM; SQLAlchemy toggle is not applied for Django mode.",
                "Framework boundary dictates internal ORM driver.",
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::strategy::test_support::{KeyEcho, blueprint};
    use crate::domain::{DataField, DataModel, FileTree, ServiceSpec};

    fn run(bp: &Blueprint) -> FileTree {
        let renderer = KeyEcho;
        let mut ctx = GenerationContext::new(bp, &renderer);
        let s = PythonStrategy;
        s.generate_architecture(&mut ctx).unwrap();
        s.generate_models(&mut ctx).unwrap();
        s.generate_infra(&mut ctx).unwrap();
        s.generate_dev_tools(&mut ctx).unwrap();
        ctx.finish().0
    }

    #[test]
    fn fastapi_clean_wires_snake_case_routers() {
        let bp = blueprint(|r| {
            r.language = "python".into();
            r.framework = "fastapi".into();
            r.architecture = "clean".into();
            r.custom.models = vec![DataModel {
                name: "order_line".into(),
                fields: vec![DataField::new("qty", "int")],
            }];
        });
        let tree = run(&bp);
        assert!(tree.contains_file("app/delivery/http/order_line_controller.py"));
        let main = tree.get(ENTRY).unwrap();
        assert!(main.contains(
            "# marker:imports\nfrom app.delivery.http.order_line_controller import router as order_line_router\n"
        ));
        assert!(main.contains("# marker:routes\napp.include_router(order_line_router)\n"));
    }

    #[test]
    fn orm_pulls_in_alembic() {
        let bp = blueprint(|r| {
            r.language = "python".into();
            r.framework = "fastapi".into();
            r.architecture = "mvp".into();
            r.db = "postgresql".into();
            r.use_orm = true;
            r.features.makefile = true;
        });
        let tree = run(&bp);
        assert!(tree.contains_file("alembic/env.py"));
        assert!(tree.contains_file("app/db/session.py"));
        assert!(tree.contains_file("app/schemas/item.py"));
        let reqs = tree.get("requirements.txt").unwrap();
        assert!(reqs.contains("SQLAlchemy==2.0.36\n"));
        assert!(reqs.contains("psycopg[binary]==3.2.3\n"));
        let make = tree.get("Makefile").unwrap();
        assert!(make.contains("alembic upgrade head"));
        assert!(make.contains("python scripts/seed.py"));
    }

    #[test]
    fn django_skips_crud_and_warns_about_orm() {
        let bp = blueprint(|r| {
            r.language = "python".into();
            r.framework = "django".into();
            r.architecture = "mvp".into();
            r.db = "mysql".into();
            r.use_orm = true;
        });
        let tree = run(&bp);
        assert!(tree.contains_file("manage.py"));
        assert!(tree.contains_file("api/models.py"));
        assert_eq!(tree.get("api/__init__.py"), Some(""));
        assert!(!tree.contains_file("app/main.py"));
        assert!(!tree.contains_file("app/routes/items.py"));
        assert!(tree.get("Dockerfile").unwrap().contains("manage.py"));
        assert!(tree.get("requirements.txt").unwrap().contains("mysqlclient==2.2.7"));

        let warnings = PythonStrategy.config_warnings(&bp);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, codes::DJANGO_BUILTIN_ORM);
        assert_eq!(warnings[0].severity, Severity::Info);
    }

    #[test]
    fn powershell_init_uses_activate_script() {
        let bp = blueprint(|r| {
            r.language = "python".into();
            r.framework = "fastapi".into();
            r.architecture = "mvp".into();
        });
        assert!(PythonStrategy
            .setup_command(&bp, Shell::PowerShell)
            .starts_with(".\\venv\\Scripts\\Activate.ps1\n"));
    }

    #[test]
    fn install_happens_in_setup_not_init() {
        let bp = blueprint(|r| {
            r.language = "python".into();
            r.framework = "fastapi".into();
            r.architecture = "mvp".into();
        });
        assert_eq!(PythonStrategy.init_command(&bp, Shell::Bash), "python -m venv venv\n");
        assert_eq!(
            PythonStrategy.setup_command(&bp, Shell::Bash),
            "source venv/bin/activate\npip install -r requirements.txt\n"
        );
    }

    #[test]
    fn microservices_install_each_service() {
        let bp = blueprint(|r| {
            r.language = "python".into();
            r.framework = "fastapi".into();
            r.architecture = "microservices".into();
            r.services = vec![ServiceSpec::new("users", 8081), ServiceSpec::new("orders", 8082)];
        });
        let setup = PythonStrategy.setup_command(&bp, Shell::Bash);
        assert!(setup.contains("pip install -r services/users/requirements.txt\n"));
        assert!(setup.contains("pip install -r services/orders/requirements.txt\n"));
        assert!(!setup.contains("pip install -r requirements.txt"));
    }
}
