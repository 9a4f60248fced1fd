pub mod auth;
pub mod dispatch;
pub mod dynamodb;
pub mod repo;
pub mod whoami;
