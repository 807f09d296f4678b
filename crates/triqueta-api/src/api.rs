use crate::cache::QueryCache;
use crate::favorites_controller::FavoritesController;
use crate::services::{
    ActivitiesService, AdminService, FavoritesService, RecommendationsService, UsersService,
};
use std::sync::Arc;
use triqueta_auth::{AuthService, AuthenticatedApiClient};

/// Every service of the API over one shared client.
#[derive(Clone, Debug)]
pub struct TriquetaApi {
    pub auth: AuthService,
    pub activities: ActivitiesService,
    pub favorites: FavoritesController,
    pub users: UsersService,
    pub recommendations: RecommendationsService,
    pub admin: AdminService,
}

impl TriquetaApi {
    pub fn new(client: AuthenticatedApiClient) -> Self {
        Self::with_cache(client, Arc::new(QueryCache::new()))
    }

    pub fn with_cache(client: AuthenticatedApiClient, cache: Arc<QueryCache>) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            activities: ActivitiesService::new(client.clone()),
            favorites: FavoritesController::new(FavoritesService::new(client.clone()), cache),
            users: UsersService::new(client.clone()),
            recommendations: RecommendationsService::new(client.clone()),
            admin: AdminService::new(client),
        }
    }
}
