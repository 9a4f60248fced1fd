use std::io::{BufRead, BufReader, Write as _};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use caws_core::{AccessDetails, AccountDetails};
use chrono::Utc;

use crate::error::AuthError;
use crate::provider::{LoginFlow, LoginResponse};
use crate::stored_provider::new_session;

type Input = Box<dyn BufRead + Send>;

/// Terminal login: asks for an account id, a label, and an access token.
///
/// A blank account id or token, or end of input, cancels the login.
pub struct PromptLoginFlow {
    input: Arc<Mutex<Input>>,
    token_ttl: Option<chrono::Duration>,
}

#[derive(Debug, PartialEq, Eq)]
struct Answers {
    account: AccountDetails,
    token: String,
}

impl PromptLoginFlow {
    pub fn stdin(token_ttl: Option<chrono::Duration>) -> Self {
        Self::with_input(BufReader::new(std::io::stdin()), token_ttl)
    }

    pub fn with_input(
        input: impl BufRead + Send + 'static,
        token_ttl: Option<chrono::Duration>,
    ) -> Self {
        Self {
            input: Arc::new(Mutex::new(Box::new(input))),
            token_ttl,
        }
    }
}

#[async_trait]
impl LoginFlow for PromptLoginFlow {
    async fn run(&self) -> Option<LoginResponse> {
        // Reading the terminal blocks, so keep it off the async workers.
        let input = Arc::clone(&self.input);
        let answers = match tokio::task::spawn_blocking(move || read_answers(&input)).await {
            Ok(Ok(answers)) => answers?,
            Ok(Err(error)) => {
                tracing::warn!(%error, "login prompt failed; treating as cancelled");
                return None;
            }
            Err(error) => {
                tracing::warn!(%error, "login prompt task failed; treating as cancelled");
                return None;
            }
        };

        let mut access = AccessDetails::new(answers.token);
        if let Some(ttl) = self.token_ttl {
            access = access.with_expiry(Utc::now() + ttl);
        }

        match new_session(answers.account, access) {
            Ok(session) => Some(LoginResponse { session }),
            Err(error) => {
                tracing::warn!(%error, "failed to prepare new session");
                None
            }
        }
    }
}

fn read_answers(input: &Mutex<Input>) -> Result<Option<Answers>, AuthError> {
    let mut input = input.lock().unwrap_or_else(PoisonError::into_inner);

    let Some(account_id) = prompt(&mut **input, "CodeCatalyst account id")?.filter(|s| !s.is_empty())
    else {
        return Ok(None);
    };
    let Some(label) = prompt(&mut **input, "Label (blank for account id)")? else {
        return Ok(None);
    };
    let Some(token) = prompt(&mut **input, "Access token")?.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let label = if label.is_empty() {
        account_id.clone()
    } else {
        label
    };

    Ok(Some(Answers {
        account: AccountDetails {
            id: account_id,
            label,
        },
        token,
    }))
}

/// `None` on end of input.
fn prompt(input: &mut dyn BufRead, question: &str) -> Result<Option<String>, AuthError> {
    eprint!("{question}: ");
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| AuthError::LoginFlowFailed(format!("read {question}: {e}")))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
