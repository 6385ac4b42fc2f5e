//! Test harness with testcontainers for integration testing.
//!
//! A single Postgres container is shared across all tests: it starts and runs
//! migrations on the first test, later tests reuse it. Tests isolate on phone
//! numbers rather than databases, so every test must use a fresh phone.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::domains::auth::otp::{LocalOtpStore, OtpGateway};
use server_core::domains::auth::JwtService;
use server_core::kernel::ServerDeps;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG when tests run with --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness giving each test a fresh pool over the shared database.
pub struct TestHarness {
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self { db_pool })
    }

    /// Deps wired to the local fallback OTP strategy
    pub fn local_deps(&self) -> ServerDeps {
        self.deps_with_gateway(Arc::new(LocalOtpStore::new(self.db_pool.clone())))
    }

    /// Deps with an arbitrary gateway (for fake-provider tests)
    pub fn deps_with_gateway(&self, gateway: Arc<dyn OtpGateway>) -> ServerDeps {
        ServerDeps::new(self.db_pool.clone(), gateway, test_jwt_service())
    }
}

/// JWT service with fixed test parameters
pub fn test_jwt_service() -> Arc<JwtService> {
    Arc::new(JwtService::new(
        "test_secret_key",
        "test_issuer".to_string(),
        168,
    ))
}
