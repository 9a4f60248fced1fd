use caws_auth::remote_client::RemoteClient;
use caws_auth::{Connected, Runner};
use caws_core::RepoRef;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RepoCommands;
use crate::cli::subcommands::repo::RepoCloneUriArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CloneUriResponse {
    org: String,
    project: String,
    repo: String,
    uri: String,
}

pub async fn handle(action: &RepoCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        RepoCommands::CloneUri(args) => clone_uri(args, ctx, flags).await,
    }
}

async fn clone_uri(args: &RepoCloneUriArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // A malformed link never reaches the login prompt.
    let repo = RepoRef::parse(&args.url)?;
    let git_host = ctx.config.caws.git_host.clone();

    let runner = ctx
        .decorator
        .decorate(move |_client: Connected<RemoteClient>, repo: RepoRef| {
            let uri = build_clone_uri(&git_host, &repo);
            async move {
                Ok::<_, anyhow::Error>(CloneUriResponse {
                    org: repo.org,
                    project: repo.project,
                    repo: repo.repo,
                    uri,
                })
            }
        });

    match runner.run(repo).await? {
        Some(response) => output(&response, flags.format),
        None => Ok(()),
    }
}

/// `https://<git_host>/v1/<org>/<project>/<repo>` with each segment percent-encoded.
fn build_clone_uri(git_host: &str, repo: &RepoRef) -> String {
    format!(
        "https://{git_host}/v1/{}/{}/{}",
        urlencoding::encode(&repo.org),
        urlencoding::encode(&repo.project),
        urlencoding::encode(&repo.repo),
    )
}
