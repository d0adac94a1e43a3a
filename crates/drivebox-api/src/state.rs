//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use drivebox_auth::jwt::decoder::JwtDecoder;
use drivebox_auth::jwt::encoder::JwtEncoder;
use drivebox_auth::password::hasher::PasswordHasher;
use drivebox_core::config::AppConfig;
use drivebox_core::traits::blob::BlobStore;

use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::repositories::share::ShareRepository;
use drivebox_database::repositories::trash::TrashRepository;
use drivebox_database::repositories::user::UserRepository;

use drivebox_service::blob::BlobClient;
use drivebox_service::file::service::FileService;
use drivebox_service::file::upload::UploadLimits;
use drivebox_service::folder::service::FolderService;
use drivebox_service::search::SearchService;
use drivebox_service::share::access::AccessService;
use drivebox_service::share::service::ShareService;
use drivebox_service::trash::TrashService;
use drivebox_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Timeout-guarded blob store access.
    pub blob: BlobClient,

    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// File service.
    pub file_service: Arc<FileService>,
    /// Share service.
    pub share_service: Arc<ShareService>,
    /// Trash service.
    pub trash_service: Arc<TrashService>,
    /// User service.
    pub user_service: Arc<UserService>,
    /// Search service.
    pub search_service: Arc<SearchService>,
}

impl AppState {
    /// Wires repositories and services around the pool and blob store.
    pub fn new(config: Arc<AppConfig>, db_pool: PgPool, blob_store: Arc<dyn BlobStore>) -> Self {
        let blob = BlobClient::new(
            blob_store,
            Duration::from_secs(config.storage.operation_timeout_seconds),
        );

        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));
        let file_repo = Arc::new(FileRepository::new(db_pool.clone()));
        let share_repo = Arc::new(ShareRepository::new(db_pool.clone()));
        let trash_repo = Arc::new(TrashRepository::new(db_pool.clone()));

        let password_hasher = PasswordHasher::new();
        let jwt_encoder = JwtEncoder::new(&config.auth);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let access_service = Arc::new(AccessService::new(Arc::clone(&share_repo)));
        let limits = UploadLimits::from(&config.storage);

        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&file_repo),
            Arc::clone(&trash_repo),
            Arc::clone(&access_service),
            blob.clone(),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&file_repo),
            Arc::clone(&folder_repo),
            Arc::clone(&user_repo),
            Arc::clone(&trash_repo),
            Arc::clone(&access_service),
            blob.clone(),
            limits,
        ));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&share_repo),
            Arc::clone(&file_repo),
            Arc::clone(&folder_repo),
        ));
        let trash_service = Arc::new(TrashService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&file_repo),
            Arc::clone(&trash_repo),
            blob.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&folder_repo),
            password_hasher,
            jwt_encoder,
            &config.auth,
            limits.user_quota,
        ));
        let search_service = Arc::new(SearchService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&file_repo),
        ));

        Self {
            config,
            db_pool,
            blob,
            jwt_decoder,
            folder_service,
            file_service,
            share_service,
            trash_service,
            user_service,
            search_service,
        }
    }
}
