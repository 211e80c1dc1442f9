//! The template set compiled into the binary.
//!
//! Keys mirror the file layout under `templates/`: `go/clean/main` is
//! `templates/go/clean/main.tmpl`. Entry points (`<lang>/<arch>/main`) carry
//! the `marker:imports` and `marker:routes` comment lines the pipeline injects
//! model wiring into.

/// `(key, source)` for every builtin template, sorted by key.
pub static BUILTIN: &[(&str, &str)] = &[
    // ── go ────────────────────────────────────────────────────────────────────
    ("go/clean/main", include_str!("../templates/go/clean/main.tmpl")),
    ("go/clean/model_domain", include_str!("../templates/go/clean/model_domain.tmpl")),
    ("go/clean/model_handler", include_str!("../templates/go/clean/model_handler.tmpl")),
    ("go/clean/model_repository", include_str!("../templates/go/clean/model_repository.tmpl")),
    ("go/clean/model_usecase", include_str!("../templates/go/clean/model_usecase.tmpl")),
    ("go/common/base_route", include_str!("../templates/go/common/base_route.tmpl")),
    ("go/common/config", include_str!("../templates/go/common/config.tmpl")),
    ("go/common/db_connection", include_str!("../templates/go/common/db_connection.tmpl")),
    ("go/common/db_retry", include_str!("../templates/go/common/db_retry.tmpl")),
    ("go/common/error_middleware", include_str!("../templates/go/common/error_middleware.tmpl")),
    ("go/common/grpc_client", include_str!("../templates/go/common/grpc_client.tmpl")),
    ("go/common/grpc_server", include_str!("../templates/go/common/grpc_server.tmpl")),
    ("go/common/health", include_str!("../templates/go/common/health.tmpl")),
    ("go/common/item_model", include_str!("../templates/go/common/item_model.tmpl")),
    ("go/common/jwt", include_str!("../templates/go/common/jwt.tmpl")),
    ("go/common/logger", include_str!("../templates/go/common/logger.tmpl")),
    ("go/common/orm_models", include_str!("../templates/go/common/orm_models.tmpl")),
    ("go/common/pagination", include_str!("../templates/go/common/pagination.tmpl")),
    ("go/common/request_id", include_str!("../templates/go/common/request_id.tmpl")),
    ("go/common/request_logger", include_str!("../templates/go/common/request_logger.tmpl")),
    ("go/common/sample_test", include_str!("../templates/go/common/sample_test.tmpl")),
    ("go/common/seeder", include_str!("../templates/go/common/seeder.tmpl")),
    ("go/hexagonal/main", include_str!("../templates/go/hexagonal/main.tmpl")),
    ("go/hexagonal/model_adapter", include_str!("../templates/go/hexagonal/model_adapter.tmpl")),
    ("go/hexagonal/model_handler", include_str!("../templates/go/hexagonal/model_handler.tmpl")),
    ("go/hexagonal/model_port", include_str!("../templates/go/hexagonal/model_port.tmpl")),
    ("go/hexagonal/model_service", include_str!("../templates/go/hexagonal/model_service.tmpl")),
    ("go/microservice/main", include_str!("../templates/go/microservice/main.tmpl")),
    ("go/modular/main", include_str!("../templates/go/modular/main.tmpl")),
    ("go/modular/model_http", include_str!("../templates/go/modular/model_http.tmpl")),
    ("go/modular/model_repository", include_str!("../templates/go/modular/model_repository.tmpl")),
    ("go/modular/model_service", include_str!("../templates/go/modular/model_service.tmpl")),
    ("go/mvp/main", include_str!("../templates/go/mvp/main.tmpl")),
    ("go/mvp/model_handler", include_str!("../templates/go/mvp/model_handler.tmpl")),
    // ── node ──────────────────────────────────────────────────────────────────
    ("node/clean/main", include_str!("../templates/node/clean/main.tmpl")),
    ("node/clean/model_controller", include_str!("../templates/node/clean/model_controller.tmpl")),
    ("node/clean/model_domain", include_str!("../templates/node/clean/model_domain.tmpl")),
    ("node/clean/model_repository", include_str!("../templates/node/clean/model_repository.tmpl")),
    ("node/clean/model_usecase", include_str!("../templates/node/clean/model_usecase.tmpl")),
    ("node/clean/ping_controller", include_str!("../templates/node/clean/ping_controller.tmpl")),
    ("node/clean/ping_domain", include_str!("../templates/node/clean/ping_domain.tmpl")),
    ("node/clean/ping_repository", include_str!("../templates/node/clean/ping_repository.tmpl")),
    ("node/clean/ping_usecase", include_str!("../templates/node/clean/ping_usecase.tmpl")),
    ("node/common/base_route", include_str!("../templates/node/common/base_route.tmpl")),
    ("node/common/config", include_str!("../templates/node/common/config.tmpl")),
    ("node/common/db_retry", include_str!("../templates/node/common/db_retry.tmpl")),
    ("node/common/error_middleware", include_str!("../templates/node/common/error_middleware.tmpl")),
    ("node/common/grpc_client", include_str!("../templates/node/common/grpc_client.tmpl")),
    ("node/common/grpc_server", include_str!("../templates/node/common/grpc_server.tmpl")),
    ("node/common/health", include_str!("../templates/node/common/health.tmpl")),
    ("node/common/jwt", include_str!("../templates/node/common/jwt.tmpl")),
    ("node/common/logger", include_str!("../templates/node/common/logger.tmpl")),
    ("node/common/pagination", include_str!("../templates/node/common/pagination.tmpl")),
    ("node/common/request_id", include_str!("../templates/node/common/request_id.tmpl")),
    ("node/common/request_logger", include_str!("../templates/node/common/request_logger.tmpl")),
    ("node/common/sample_test", include_str!("../templates/node/common/sample_test.tmpl")),
    ("node/db/prisma_client", include_str!("../templates/node/db/prisma_client.tmpl")),
    ("node/db/prisma_schema", include_str!("../templates/node/db/prisma_schema.tmpl")),
    ("node/db/prisma_seed", include_str!("../templates/node/db/prisma_seed.tmpl")),
    ("node/db/sql_client", include_str!("../templates/node/db/sql_client.tmpl")),
    ("node/db/sql_seed", include_str!("../templates/node/db/sql_seed.tmpl")),
    ("node/default/model_routes", include_str!("../templates/node/default/model_routes.tmpl")),
    ("node/hexagonal/main", include_str!("../templates/node/hexagonal/main.tmpl")),
    ("node/hexagonal/model_adapter", include_str!("../templates/node/hexagonal/model_adapter.tmpl")),
    ("node/hexagonal/model_controller", include_str!("../templates/node/hexagonal/model_controller.tmpl")),
    ("node/hexagonal/model_port", include_str!("../templates/node/hexagonal/model_port.tmpl")),
    ("node/hexagonal/model_service", include_str!("../templates/node/hexagonal/model_service.tmpl")),
    ("node/hexagonal/ping_adapter", include_str!("../templates/node/hexagonal/ping_adapter.tmpl")),
    ("node/hexagonal/ping_controller", include_str!("../templates/node/hexagonal/ping_controller.tmpl")),
    ("node/hexagonal/ping_port", include_str!("../templates/node/hexagonal/ping_port.tmpl")),
    ("node/hexagonal/ping_service", include_str!("../templates/node/hexagonal/ping_service.tmpl")),
    ("node/microservice/main", include_str!("../templates/node/microservice/main.tmpl")),
    ("node/modular/main", include_str!("../templates/node/modular/main.tmpl")),
    ("node/mvp/main", include_str!("../templates/node/mvp/main.tmpl")),
    // ── python ────────────────────────────────────────────────────────────────
    ("python/clean/main", include_str!("../templates/python/clean/main.tmpl")),
    ("python/clean/model_controller", include_str!("../templates/python/clean/model_controller.tmpl")),
    ("python/clean/model_domain", include_str!("../templates/python/clean/model_domain.tmpl")),
    ("python/clean/model_repository", include_str!("../templates/python/clean/model_repository.tmpl")),
    ("python/clean/model_usecase", include_str!("../templates/python/clean/model_usecase.tmpl")),
    ("python/clean/ping_controller", include_str!("../templates/python/clean/ping_controller.tmpl")),
    ("python/clean/ping_domain", include_str!("../templates/python/clean/ping_domain.tmpl")),
    ("python/clean/ping_repository", include_str!("../templates/python/clean/ping_repository.tmpl")),
    ("python/clean/ping_usecase", include_str!("../templates/python/clean/ping_usecase.tmpl")),
    ("python/common/base_route", include_str!("../templates/python/common/base_route.tmpl")),
    ("python/common/config", include_str!("../templates/python/common/config.tmpl")),
    ("python/common/db_retry", include_str!("../templates/python/common/db_retry.tmpl")),
    ("python/common/error_middleware", include_str!("../templates/python/common/error_middleware.tmpl")),
    ("python/common/grpc_client", include_str!("../templates/python/common/grpc_client.tmpl")),
    ("python/common/grpc_server", include_str!("../templates/python/common/grpc_server.tmpl")),
    ("python/common/health", include_str!("../templates/python/common/health.tmpl")),
    ("python/common/jwt", include_str!("../templates/python/common/jwt.tmpl")),
    ("python/common/logger", include_str!("../templates/python/common/logger.tmpl")),
    ("python/common/pagination", include_str!("../templates/python/common/pagination.tmpl")),
    ("python/common/request_id", include_str!("../templates/python/common/request_id.tmpl")),
    ("python/common/request_logger", include_str!("../templates/python/common/request_logger.tmpl")),
    ("python/common/sample_test", include_str!("../templates/python/common/sample_test.tmpl")),
    ("python/db/alembic_env", include_str!("../templates/python/db/alembic_env.tmpl")),
    ("python/db/alembic_ini", include_str!("../templates/python/db/alembic_ini.tmpl")),
    ("python/db/alembic_script_mako", include_str!("../templates/python/db/alembic_script_mako.tmpl")),
    ("python/db/orm_models", include_str!("../templates/python/db/orm_models.tmpl")),
    ("python/db/seed", include_str!("../templates/python/db/seed.tmpl")),
    ("python/db/sql_driver", include_str!("../templates/python/db/sql_driver.tmpl")),
    ("python/db/sqlalchemy_session", include_str!("../templates/python/db/sqlalchemy_session.tmpl")),
    ("python/default/model_routes", include_str!("../templates/python/default/model_routes.tmpl")),
    ("python/default/model_schema", include_str!("../templates/python/default/model_schema.tmpl")),
    ("python/django/api_urls", include_str!("../templates/python/django/api_urls.tmpl")),
    ("python/django/apps", include_str!("../templates/python/django/apps.tmpl")),
    ("python/django/manage", include_str!("../templates/python/django/manage.tmpl")),
    ("python/django/middleware", include_str!("../templates/python/django/middleware.tmpl")),
    ("python/django/models", include_str!("../templates/python/django/models.tmpl")),
    ("python/django/pagination", include_str!("../templates/python/django/pagination.tmpl")),
    ("python/django/settings", include_str!("../templates/python/django/settings.tmpl")),
    ("python/django/tests", include_str!("../templates/python/django/tests.tmpl")),
    ("python/django/urls", include_str!("../templates/python/django/urls.tmpl")),
    ("python/django/views", include_str!("../templates/python/django/views.tmpl")),
    ("python/django/wsgi", include_str!("../templates/python/django/wsgi.tmpl")),
    ("python/hexagonal/main", include_str!("../templates/python/hexagonal/main.tmpl")),
    ("python/hexagonal/model_adapter", include_str!("../templates/python/hexagonal/model_adapter.tmpl")),
    ("python/hexagonal/model_controller", include_str!("../templates/python/hexagonal/model_controller.tmpl")),
    ("python/hexagonal/model_port", include_str!("../templates/python/hexagonal/model_port.tmpl")),
    ("python/hexagonal/model_service", include_str!("../templates/python/hexagonal/model_service.tmpl")),
    ("python/hexagonal/ping_adapter", include_str!("../templates/python/hexagonal/ping_adapter.tmpl")),
    ("python/hexagonal/ping_controller", include_str!("../templates/python/hexagonal/ping_controller.tmpl")),
    ("python/hexagonal/ping_port", include_str!("../templates/python/hexagonal/ping_port.tmpl")),
    ("python/hexagonal/ping_service", include_str!("../templates/python/hexagonal/ping_service.tmpl")),
    ("python/microservice/main", include_str!("../templates/python/microservice/main.tmpl")),
    ("python/modular/main", include_str!("../templates/python/modular/main.tmpl")),
    ("python/mvp/main", include_str!("../templates/python/mvp/main.tmpl")),
];

/// Source of the builtin template registered under `key`.
pub fn get(key: &str) -> Option<&'static str> {
    BUILTIN
        .binary_search_by(|(k, _)| k.cmp(&key))
        .ok()
        .map(|i| BUILTIN[i].1)
}

/// Every builtin key, sorted.
pub fn keys() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_sorted_and_unique() {
        let keys: Vec<_> = keys().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn entry_points_carry_both_markers() {
        for (key, source) in BUILTIN.iter().filter(|(k, _)| k.ends_with("/main")) {
            assert!(source.contains("marker:imports"), "{key} lacks the imports marker");
            assert!(source.contains("marker:routes"), "{key} lacks the routes marker");
        }
    }

    #[test]
    fn every_architecture_has_an_entry_point() {
        for lang in ["go", "node", "python"] {
            for arch in ["mvp", "clean", "hexagonal", "modular", "microservice"] {
                let key = format!("{lang}/{arch}/main");
                assert!(get(&key).is_some(), "missing {key}");
            }
        }
    }

    #[test]
    fn lookup_misses_unknown_keys() {
        assert!(get("rust/clean/main").is_none());
        assert!(get("go/clean/model_domain").is_some());
    }
}
