mod activities;
mod admin;
mod favorites;
mod recommendations;
mod users;

pub use activities::ActivitiesService;
pub use admin::{AdminService, DEFAULT_EXECUTIONS_LIMIT, DEFAULT_PENDING_LIMIT};
pub use favorites::FavoritesService;
pub use recommendations::RecommendationsService;
pub use users::UsersService;
