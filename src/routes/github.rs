//! GitHub proxy endpoint.
//!
//! `github?query=users/<owner>/repos` runs the query against the GitHub
//! REST API through the injected [`FetchJson`] collaborator and lists the
//! repositories of the response array.

use crate::{
    fetch::FetchJson,
    http::{query::QueryParams, response::Reply, types::StatusCode},
};
use serde::Deserialize;
use std::fmt::Write;
use tracing::debug;

const USAGE: &str = "Please enter query, e.g. query=users/OWNERNAME/repos\n";

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    id: i64,
    owner: RepositoryOwner,
}

#[derive(Debug, Deserialize)]
struct RepositoryOwner {
    login: String,
}

/// Validates the `query` parameter, performs exactly one fetch, and renders
/// the repository list.
///
/// Status mapping: malformed query -> 400, empty or unparseable fetch
/// result -> 404, empty repository array -> 204, otherwise 200.
pub(crate) async fn proxy<F: FetchJson>(fetcher: &F, params: &QueryParams) -> Reply {
    let Some(query) = params.get("query") else {
        return Reply::html(StatusCode::BadRequest, USAGE);
    };

    // Exactly `users/<owner>/repos`: three segments, fixed first and last.
    let segments: Vec<&str> = query.split('/').collect();
    if segments.len() != 3 || segments[0] != "users" || segments[2] != "repos" {
        return Reply::html(StatusCode::BadRequest, USAGE);
    }

    let url = format!("https://api.github.com/{query}");
    let json = fetcher.fetch(&url).await;
    debug!(url, bytes = json.len(), "github fetch finished");

    if json.is_empty() {
        return Reply::html(
            StatusCode::NotFound,
            "Github could not be found. Please try again.\n",
        );
    }

    let repositories: Vec<Repository> = match serde_json::from_str(&json) {
        Ok(repositories) => repositories,
        Err(err) => {
            debug!(%err, "github response was not a repository array");
            return Reply::html(
                StatusCode::NotFound,
                "Github could not be found. Please try again.\n",
            );
        }
    };

    if repositories.is_empty() {
        return Reply::html(
            StatusCode::NoContent,
            "This github does not have public repositories.\n",
        );
    }

    let mut body = String::new();
    for (i, repository) in repositories.iter().enumerate() {
        let _ = writeln!(
            body,
            "Repository {i} - fullname: {} id: {} login: {}\n",
            repository.full_name, repository.id, repository.owner.login
        );
    }

    Reply::html(StatusCode::Ok, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubFetcher {
        body: &'static str,
    }

    impl FetchJson for StubFetcher {
        async fn fetch(&self, _url: &str) -> String {
            self.body.to_owned()
        }
    }

    fn params(raw: &str) -> QueryParams {
        QueryParams::parse(raw).unwrap()
    }

    const TWO_REPOS: &str = r#"[
        {"full_name": "torvalds/linux", "id": 2325298,
         "owner": {"login": "torvalds"}},
        {"full_name": "torvalds/subsurface", "id": 2325299,
         "owner": {"login": "torvalds"}}
    ]"#;

    #[tokio::test]
    async fn lists_repositories_in_order() {
        let fetcher = StubFetcher { body: TWO_REPOS };
        let reply = proxy(&fetcher, &params("query=users/torvalds/repos")).await;

        assert_eq!(reply.status(), StatusCode::Ok);
        let lines: Vec<&str> = reply
            .body()
            .lines()
            .filter(|line| !line.is_empty())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Repository 0 - fullname: torvalds/linux id: 2325298 login: torvalds"
        );
        assert_eq!(
            lines[1],
            "Repository 1 - fullname: torvalds/subsurface id: 2325299 login: torvalds"
        );
    }

    #[tokio::test]
    async fn empty_array_is_204() {
        let fetcher = StubFetcher { body: "[]" };
        let reply = proxy(&fetcher, &params("query=users/torvalds/repos")).await;

        assert_eq!(reply.status(), StatusCode::NoContent);
        assert_eq!(reply.body(), "This github does not have public repositories.\n");
    }

    #[tokio::test]
    async fn empty_fetch_is_404() {
        let fetcher = StubFetcher { body: "" };
        let reply = proxy(&fetcher, &params("query=users/torvalds/repos")).await;

        assert_eq!(reply.status(), StatusCode::NotFound);
    }

    #[tokio::test]
    async fn unparseable_body_is_404() {
        let fetcher = StubFetcher {
            body: r#"{"message": "rate limited"}"#,
        };
        let reply = proxy(&fetcher, &params("query=users/torvalds/repos")).await;

        assert_eq!(reply.status(), StatusCode::NotFound);
    }

    #[tokio::test]
    async fn malformed_queries_are_400() {
        let fetcher = StubFetcher { body: TWO_REPOS };
        let cases = [
            "",
            "other=1",
            "query=repos/torvalds/users",
            "query=users/torvalds",
            "query=users/torvalds/repos/extra",
            "query=orgs/rust-lang/repos",
        ];

        for raw in cases {
            let reply = proxy(&fetcher, &params(raw)).await;

            assert_eq!(reply.status(), StatusCode::BadRequest, "raw: {raw}");
            assert_eq!(reply.body(), USAGE);
        }
    }
}
