// Directory client tests against a mock HTTP server

use relay_pair::models::MemberStatus;
use relay_pair::services::DirectoryClient;

fn member_doc(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "memberId": id,
        "name": format!("Member {}", id),
        "joinedAt": "2024-03-01T00:00:00Z",
        "industry": "fintech",
        "expertise": ["rust"],
        "lookingFor": ["fundraising"],
        "canHelpWith": ["hiring"],
        "status": status
    })
}

#[tokio::test]
async fn test_get_pairing_pool_parses_members() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!({
        "total": 2,
        "members": [
            member_doc("m1", "active"),
            member_doc("m2", "quarterly_cadence"),
        ]
    });

    let mock = server
        .mock("GET", "/members")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "test_key".to_string());
    let members = client.get_pairing_pool().await.unwrap();

    mock.assert_async().await;
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].member_id, "m1");
    assert_eq!(members[0].status, MemberStatus::Active);
    assert_eq!(members[1].status, MemberStatus::QuarterlyCadence);
    assert_eq!(members[0].expertise, vec!["rust".to_string()]);
}

#[tokio::test]
async fn test_get_pairing_pool_skips_malformed_documents() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!({
        "total": 3,
        "members": [
            member_doc("m1", "active"),
            { "memberId": "broken" },
            member_doc("m3", "active"),
        ]
    });

    let _mock = server
        .mock("GET", "/members")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "test_key".to_string());
    let members = client.get_pairing_pool().await.unwrap();

    // One bad profile degrades the pool, never the fetch
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].member_id, "m1");
    assert_eq!(members[1].member_id, "m3");
}

#[tokio::test]
async fn test_get_pairing_pool_api_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/members")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "test_key".to_string());
    let result = client.get_pairing_pool().await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_member_not_found() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/members/missing")
        .with_status(404)
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "test_key".to_string());
    let result = client.get_member("missing").await;

    assert!(matches!(
        result,
        Err(relay_pair::services::DirectoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_get_member_parses_profile() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/members/m1")
        .with_status(200)
        .with_body(member_doc("m1", "active").to_string())
        .create_async()
        .await;

    let client = DirectoryClient::new(server.url(), "test_key".to_string());
    let member = client.get_member("m1").await.unwrap();

    assert_eq!(member.member_id, "m1");
    assert_eq!(member.industry.as_deref(), Some("fintech"));
}
