pub mod repo;
pub mod sqlite_repo;
