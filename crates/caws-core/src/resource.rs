//! Repository references addressed by clone links.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// An `<org>/<project>/<repo>` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub org: String,
    pub project: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse a clone link, either a full URL (`https://host/clone/org/project/repo`)
    /// or a bare path (`/clone/org/project/repo`).
    ///
    /// The first path segment names the link kind and is not inspected.
    /// Segments after the repository name are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidResourceUrl` when the organization, project,
    /// or repository segment is missing or empty.
    pub fn parse(url: &str) -> Result<Self, CoreError> {
        let path = strip_origin(url.trim());
        let path = path.split(['?', '#']).next().unwrap_or_default();

        let mut segments = path.strip_prefix('/').unwrap_or(path).split('/').skip(1);
        let mut next = || segments.next().filter(|s| !s.is_empty());
        let (org, project, repo) = (next(), next(), next());

        let invalid = |reason: &str| CoreError::InvalidResourceUrl {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        Ok(Self {
            org: org.ok_or_else(|| invalid("organization was undefined"))?.to_string(),
            project: project.ok_or_else(|| invalid("project was undefined"))?.to_string(),
            repo: repo.ok_or_else(|| invalid("repository was undefined"))?.to_string(),
        })
    }
}

fn strip_origin(url: &str) -> &str {
    url.split_once("://").map_or(url, |(_, rest)| {
        rest.find('/').map_or("", |slash| &rest[slash..])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/clone/acme/payments/api")]
    #[case("clone/acme/payments/api/")]
    #[case("https://codecatalyst.aws/clone/acme/payments/api")]
    #[case("https://codecatalyst.aws/clone/acme/payments/api?ref=main")]
    #[case("vscode://amazonwebservices.aws-toolkit-vscode/clone/acme/payments/api/extra")]
    fn parses_org_project_repo_after_link_kind(#[case] input: &str) {
        assert_eq!(
            RepoRef::parse(input).expect("valid url"),
            RepoRef {
                org: "acme".into(),
                project: "payments".into(),
                repo: "api".into(),
            }
        );
    }

    #[test]
    fn leading_segment_is_not_part_of_the_reference() {
        let parsed = RepoRef::parse("/open/acme/payments/api").expect("valid url");
        assert_eq!(parsed.org, "acme");
    }

    #[rstest]
    #[case("/", "organization was undefined")]
    #[case("/clone", "organization was undefined")]
    #[case("https://codecatalyst.aws", "organization was undefined")]
    #[case("/clone//payments/api", "organization was undefined")]
    #[case("/clone/acme", "project was undefined")]
    #[case("https://codecatalyst.aws/clone/acme/payments", "repository was undefined")]
    fn rejects_incomplete_paths(#[case] input: &str, #[case] reason: &str) {
        let err = RepoRef::parse(input).unwrap_err();
        assert!(
            err.to_string().contains(reason),
            "expected '{reason}' in '{err}'"
        );
    }
}
