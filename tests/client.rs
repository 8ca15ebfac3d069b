//
//  reportal-client
//  tests/client.rs
//

//! End-to-end tests of the request pipeline against a mock server:
//! credential injection, URL/query composition, typed decoding, error
//! translation, raw PDF passthrough, and cancellation.

use mockito::Matcher;
use reportal_client::{
    CancellationToken, ClientConfig, Error, ReportParams, ReportQueryParams, ReportRef,
    ReportalClient, ReportListQuery, WorkspaceRef,
};
use serde_json::json;

const TOKEN: &str = "secret-token";

fn client_for(server: &mockito::ServerGuard) -> ReportalClient {
    ReportalClient::new(ClientConfig::new(server.url(), TOKEN)).unwrap()
}

#[tokio::test]
async fn test_list_workspaces_sends_bearer_and_decodes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/workspaces")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 1, "name": "Acme", "code": "acme", "description": "Main tenant"},
                {"id": 2, "name": "Globex", "code": "globex"}
            ]"#,
        )
        .create_async()
        .await;

    let workspaces = client_for(&server).list_workspaces(None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(workspaces.len(), 2);
    assert_eq!(workspaces[0].code, "acme");
    assert_eq!(workspaces[1].description, None);
}

#[tokio::test]
async fn test_list_reports_resolves_workspace_code_and_passes_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/ws/acme/reports")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "invoice".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{
                "id": 12,
                "name": "Invoice",
                "reportTypeId": 3,
                "reportTypeName": "invoice",
                "reportTemplateName": "invoice-a4",
                "isDefault": true
            }]"#,
        )
        .create_async()
        .await;

    let query = ReportListQuery {
        report_type: Some("invoice".to_owned()),
        limit: Some(10),
        offset: None,
    };
    let reports = client_for(&server)
        .list_reports(Some(&WorkspaceRef::code("acme")), Some(&query), None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].report_template_name, "invoice-a4");
    assert!(reports[0].is_default);
}

#[tokio::test]
async fn test_list_reports_uses_configured_default_workspace() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/ws/7/reports")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let config = ClientConfig::new(server.url(), TOKEN).with_default_workspace_id("7");
    let client = ReportalClient::new(config).unwrap();
    let reports = client.list_reports(None, None, None).await.unwrap();

    mock.assert_async().await;
    assert!(reports.is_empty());
}

#[tokio::test]
async fn test_list_reports_without_any_workspace_fails_before_dispatch() {
    let server = mockito::Server::new_async().await;
    let err = client_for(&server)
        .list_reports(None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingWorkspaceId));
}

#[tokio::test]
async fn test_download_pdf_returns_raw_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/ws/acme/reports/12/pdf")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(b"%PDF-1.7 fake body".as_slice())
        .create_async()
        .await;

    let response = client_for(&server)
        .download_report_pdf(
            &ReportParams {
                workspace: Some(WorkspaceRef::code("acme")),
                report: ReportRef::id(12),
                query: None,
            },
            None,
        )
        .await
        .unwrap();

    mock.assert_async().await;
    let body = response.bytes().await.unwrap();
    assert_eq!(body.as_ref(), b"%PDF-1.7 fake body");
}

#[tokio::test]
async fn test_staged_data_flow_references_temp_data_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/ws/acme/temporary-data")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_body(Matcher::Json(json!({
            "content": {"a": 1},
            "expiryDate": null
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"tempDataId": 42}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let staged = client
        .push_temporary_data(json!({"a": 1}), None, Some(&WorkspaceRef::code("acme")), None)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(staged.temp_data_id, 42);

    // Referencing the staged payload puts the id in the URL, not the JSON.
    let url = client
        .report_pdf_url(&ReportParams {
            workspace: Some(WorkspaceRef::code("acme")),
            report: ReportRef::type_code("invoice"),
            query: Some(ReportQueryParams {
                temp_data_id: Some(staged.temp_data_id),
                ..Default::default()
            }),
        })
        .unwrap();
    assert!(url.ends_with("/api/v1/ws/acme/reports/invoice/pdf?tempDataId=42"));
}

#[tokio::test]
async fn test_create_nonce_token_posts_without_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/nonce-tokens")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"nonce": "n-123"}"#)
        .create_async()
        .await;

    let token = client_for(&server).create_nonce_token(None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(token.nonce, "n-123");
}

#[tokio::test]
async fn test_structured_error_body_becomes_the_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/workspaces")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "bad input"}"#)
        .create_async()
        .await;

    let err = client_for(&server).list_workspaces(None).await.unwrap_err();
    assert_eq!(err.to_string(), "bad input");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "bad input");
        }
        other => panic!("expected Error::Api, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_error_body_falls_back_to_reason_phrase() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/workspaces")
        .with_status(500)
        .with_body("definitely not json")
        .create_async()
        .await;

    let err = client_for(&server).list_workspaces(None).await.unwrap_err();
    assert_eq!(err.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn test_empty_error_message_falls_back_to_reason_phrase() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/workspaces")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": ""}"#)
        .create_async()
        .await;

    let err = client_for(&server).list_workspaces(None).await.unwrap_err();
    assert_eq!(err.to_string(), "Not Found");
}

#[tokio::test]
async fn test_invalid_success_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/workspaces")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("definitely not json")
        .create_async()
        .await;

    let err = client_for(&server).list_workspaces(None).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_connection_failure_is_a_transport_error() {
    // Nothing listens here; the connection is refused before any status
    // exists to translate.
    let config = ClientConfig::new("http://127.0.0.1:9", TOKEN);
    let client = ReportalClient::new(config).unwrap();
    let err = client.list_workspaces(None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_cancelled_token_aborts_before_dispatch() {
    let server = mockito::Server::new_async().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client_for(&server)
        .list_workspaces(Some(&cancel))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}
