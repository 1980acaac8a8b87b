use reddit_client::{
    RedditClient, RedditCredentials, RedditError, SearchRequest, SearchSort, TimeFilter,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> RedditCredentials {
    RedditCredentials {
        client_id: "id".into(),
        client_secret: "secret".into(),
        user_agent: "disaster-pipeline-tests/0.1".into(),
    }
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "token_type": "bearer",
            "expires_in": 3600,
            "scope": "*"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> RedditClient {
    RedditClient::new(credentials())
        .with_urls(format!("{}/api/v1/access_token", server.uri()), server.uri())
}

fn flood_request() -> SearchRequest {
    SearchRequest::new(vec!["news".into(), "floods".into()], "(flood) East District")
        .sort(SearchSort::New)
        .time_filter(TimeFilter::Week)
        .limit(20)
}

#[tokio::test]
async fn search_returns_only_link_submissions() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/r/news+floods/search"))
        .and(header("authorization", "Bearer tok"))
        .and(query_param("sort", "new"))
        .and(query_param("t", "week"))
        .and(query_param("limit", "20"))
        .and(query_param("restrict_sr", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Listing",
            "data": {
                "children": [
                    { "kind": "t3", "data": {
                        "id": "p1",
                        "title": "Flooding closes roads in East District",
                        "selftext": "",
                        "is_self": false,
                        "author": "reporter",
                        "created_utc": 1711700000.0,
                        "url": "https://news.example/flood",
                        "permalink": "/r/news/comments/p1/",
                        "subreddit": "news",
                        "score": 42
                    }},
                    { "kind": "t1", "data": { "id": "c1", "body": "a comment" } }
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let posts = client.search(&flood_request()).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "p1");
    assert_eq!(posts[0].score, 42);
}

#[tokio::test]
async fn token_is_cached_between_searches() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/r/news+floods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Listing",
            "data": { "children": [] }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.search(&flood_request()).await.unwrap();
    client.search(&flood_request()).await.unwrap();
}

#[tokio::test]
async fn rejected_credentials_surface_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.search(&flood_request()).await.unwrap_err();

    assert!(matches!(err, RedditError::Api { status: 401, .. }));
    assert!(!err.is_transient());
}
