//! Dependency injection module using Shaku.
//!
//! Infrastructure (database pool, MySQL repositories, cache store) is wired
//! here. The cache-aside services are built on top with explicit
//! constructors from the resolved handles.

use deadpool_redis::{Pool, PoolConfig, Runtime};
use shaku::{module, HasComponent};
use std::sync::Arc;
use stride_config::{AppConfig, CacheBackend, RedisConfig};
use stride_core::{StrideError, StrideResult};
use stride_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, MySqlTaskRepository,
    MySqlUserRepository, TaskRepository, UserRepository,
};
use stride_service::{
    CacheInterface, CachePolicy, MemoryCacheService, RedisCacheService,
    RedisCacheServiceParameters, TaskService, TaskServiceImpl, UserService, UserServiceImpl,
};
use tracing::info;

module! {
    pub StrideModule {
        components = [
            DatabasePool,
            MySqlUserRepository,
            MySqlTaskRepository,
            RedisCacheService,
        ],
        providers = [],
    }
}

/// Connects to the primary store, runs migrations if configured, and builds
/// the infrastructure module for the configured cache backend.
pub async fn build_module(config: &AppConfig) -> StrideResult<Arc<StrideModule>> {
    let db_pool = DatabasePool::new(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }
    let (pool, query_timeout) = db_pool.into_parts();

    let mut builder = StrideModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool,
            query_timeout,
        });

    match config.cache.backend {
        CacheBackend::Memory => {
            info!(capacity = config.cache.memory_capacity, "Using in-memory cache");
            let memory = MemoryCacheService::new(config.cache.memory_capacity)?;
            builder = builder.with_component_override::<dyn CacheInterface>(Box::new(memory));
        }
        CacheBackend::Redis | CacheBackend::Disabled => {
            builder = builder.with_component_parameters::<RedisCacheService>(
                RedisCacheServiceParameters {
                    pool: redis_pool(config)?,
                },
            );
        }
    }

    Ok(Arc::new(builder.build()))
}

/// Redis pool for the configured backend; `None` leaves caching disabled.
pub fn redis_pool(config: &AppConfig) -> StrideResult<Option<Arc<Pool>>> {
    if config.cache.backend != CacheBackend::Redis || !config.redis.enabled {
        info!("Caching disabled, every read goes to the primary store");
        return Ok(None);
    }

    create_redis_pool(&config.redis).map(|pool| Some(Arc::new(pool)))
}

fn create_redis_pool(config: &RedisConfig) -> StrideResult<Pool> {
    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));

    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| StrideError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

    info!(max_size = config.pool_size, "Redis connection pool created");
    Ok(pool)
}

/// Services resolved for the HTTP layer.
pub struct Services {
    pub user_service: Arc<dyn UserService>,
    pub task_service: Arc<dyn TaskService>,
}

impl Services {
    /// Builds the cache-aside services over the module's store and cache.
    #[must_use]
    pub fn from_module(module: &StrideModule, policy: &CachePolicy) -> Self {
        let users: Arc<dyn UserRepository> = module.resolve();
        let tasks: Arc<dyn TaskRepository> = module.resolve();
        let cache: Arc<dyn CacheInterface> = module.resolve();

        Self {
            user_service: Arc::new(UserServiceImpl::new(
                users.clone(),
                cache.clone(),
                policy.clone(),
            )),
            task_service: Arc::new(TaskServiceImpl::new(tasks, users, cache, policy.clone())),
        }
    }
}

/// The module's database pool, for health checks and shutdown.
#[must_use]
pub fn database_pool(module: &StrideModule) -> Arc<dyn DatabasePoolInterface> {
    module.resolve()
}
