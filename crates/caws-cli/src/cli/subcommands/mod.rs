pub mod auth;
pub mod dynamodb;
pub mod repo;

pub use auth::AuthCommands;
pub use dynamodb::DynamodbCommands;
pub use repo::RepoCommands;
