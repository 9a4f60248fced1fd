use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credentials rejected: {0}")]
    CredentialsRejected(String),

    #[error("no stored credentials for account '{account}'")]
    NoStoredCredentials { account: String },

    #[error("stored credentials for account '{account}' have expired")]
    CredentialsExpired { account: String },

    #[error("client setup failed: {0}")]
    ClientSetup(String),

    #[error("session store error: {0}")]
    SessionStore(String),

    #[error("login prompt failed: {0}")]
    LoginFlowFailed(String),
}
