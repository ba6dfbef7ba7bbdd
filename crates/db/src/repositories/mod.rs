//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod consultation_repo;
pub mod favorite_repo;
pub mod recent_view_repo;
pub mod session_repo;
pub mod use_case_repo;
pub mod user_repo;

pub use consultation_repo::ConsultationRepo;
pub use favorite_repo::FavoriteRepo;
pub use recent_view_repo::RecentViewRepo;
pub use session_repo::SessionRepo;
pub use use_case_repo::UseCaseRepo;
pub use user_repo::UserRepo;
