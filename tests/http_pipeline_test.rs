//! End-to-end pipeline tests: live reqwest transport against a local mock server.

use std::sync::Arc;

use gitmycommits::{
    CommitDetailFetcher, CommitList, CommitListFetcher, CommitsClient, Config, Endpoint,
    FetchError, Phase, RepositoryCoordinates,
};

const SAMPLE_COMMITS: &str = r#"[{"node_id":"N1","sha":"abcdef1234567","commit":{"author":{"name":"A","email":"a@x.com","date":"2021-01-01T00:00:00Z"},"committer":{"name":"B","email":"b@x.com","date":"2021-01-01T00:00:00Z"},"message":"init"}}]"#;

fn client_for(server: &mockito::ServerGuard) -> Arc<CommitsClient> {
    let config = Config {
        api_url: server.url(),
        user_agent: "gitmycommits-test".to_string(),
        ..Config::default()
    };
    Arc::new(CommitsClient::from_config(&config).unwrap())
}

#[tokio::test]
async fn test_commit_list_from_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/mikenowakme/GitMyCommits/commits")
        .match_header("user-agent", "gitmycommits-test")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(SAMPLE_COMMITS)
        .create_async()
        .await;

    let mut fetcher = CommitListFetcher::new(client_for(&server));
    fetcher.configure(RepositoryCoordinates::new("mikenowakme", "GitMyCommits"));
    let state = fetcher.settle().await;

    mock.assert_async().await;
    assert_eq!(state.phase, Phase::Succeeded);
    let commits = state.data.as_ref().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].id, "N1");
    assert_eq!(commits[0].commit_hash(), "abcdef1");
    assert_eq!(commits[0].committer.name, "B");
}

#[tokio::test]
async fn test_not_found_surfaces_status_code() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/mikenowakme/Nope/commits")
        .with_status(404)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"{"message":"Not Found","documentation_url":"https://docs.github.com/rest"}"#)
        .create_async()
        .await;

    let mut fetcher = CommitListFetcher::new(client_for(&server));
    fetcher.configure(RepositoryCoordinates::new("mikenowakme", "Nope"));
    let state = fetcher.settle().await;

    mock.assert_async().await;
    assert_eq!(state.phase, Phase::Failed);
    assert!(state.error_occurred);
    assert_eq!(state.status_code, Some(404));
    assert!(state.error.is_none());
    assert_eq!(
        state.error_message(CommitList::ERROR_PREFIX).unwrap(),
        "An error occurred while fetching the git commits for this repository. Status code: 404"
    );
}

#[tokio::test]
async fn test_html_surfaces_unsupported_content_type() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/repos/mikenowakme/GitMyCommits/commits")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body>maintenance</body></html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .list_commits(&RepositoryCoordinates::default())
        .await
        .unwrap_err();

    match err {
        FetchError::UnsupportedContentType { content_type } => {
            assert_eq!(content_type.as_deref(), Some("text/html"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_commit_detail_from_server() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/repos/mikenowakme/GitMyCommits/commits/abcdef1234567")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"sha":"abcdef1234567","stats":{"total":5},"files":[
                {"sha":"f1","filename":"GitMyCommits/ContentView.swift","status":"modified","additions":4,"deletions":1,"changes":5,"patch":"@@ -1 +1 @@"}
            ]}"#,
        )
        .create_async()
        .await;

    let mut fetcher = CommitDetailFetcher::new(client_for(&server));
    fetcher.configure(RepositoryCoordinates::default(), "abcdef1234567");
    let state = fetcher.settle().await;

    let files = &state.data.as_ref().unwrap().files;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].id, "f1");
    assert_eq!(files[0].additions, 4);
    assert_eq!(files[0].status, "modified");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let config = Config {
        api_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let client = Arc::new(CommitsClient::from_config(&config).unwrap());

    let mut fetcher = CommitListFetcher::new(client);
    fetcher.configure(RepositoryCoordinates::default());
    let state = fetcher.settle().await;

    assert_eq!(state.phase, Phase::Failed);
    assert!(matches!(state.error, Some(FetchError::Transport(_))));
    assert!(state.status_code.is_none());
}
