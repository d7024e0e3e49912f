//! Test harness with testcontainers for integration testing.
//!
//! A single Postgres container is started on first use and shared across
//! all tests; migrations run once. Each test creates its own organization,
//! so tests stay isolated by tenancy rather than by database.

use anyhow::{Context, Result};
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::kernel::{MockEmailService, MockStorageService, ServerDeps, TestDependencies};

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG; try_init avoids panicking when already set up.
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

/// Per-test context: a pool plus collaborator doubles wired into ServerDeps.
pub struct TestHarness {
    pub db_pool: PgPool,
    test_deps: TestDependencies,
}

impl TestHarness {
    pub fn deps(&self) -> &ServerDeps {
        &self.test_deps.deps
    }

    pub fn storage(&self) -> &MockStorageService {
        &self.test_deps.storage
    }

    pub fn email(&self) -> &MockEmailService {
        &self.test_deps.email
    }
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        let infra = SharedTestInfra::get().await;
        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .expect("Failed to connect to shared test database");
        let test_deps = TestDependencies::new(db_pool.clone());
        Self { db_pool, test_deps }
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}
