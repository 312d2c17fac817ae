pub mod reunion_repo;
pub mod schema;
