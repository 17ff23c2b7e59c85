//! PostgREST wire protocol tests against a mock HTTP server

use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use core_kernel::{AdapterHealth, HealthCheckable, LeadId};
use domain_crm::{LeadStatus, NewLead, TicketStatus};
use infra_store::repositories::{LeadRepository, ServiceTicketRepository};
use infra_store::{
    ConnectionProvider, Privilege, PostgrestStore, Select, StoreBackend, StoreConfig,
    StoreError, TableStore,
};

const LEAD_ID: &str = "6f1c2b7e-3d4a-4b8e-9f0a-1c2d3e4f5a6b";

fn lead_row(status: &str) -> serde_json::Value {
    json!({
        "id": LEAD_ID,
        "name": "Dana Reyes",
        "email": "dana@example.com",
        "phone": null,
        "message": null,
        "preferred_contact": "email",
        "source": "website",
        "status": status,
        "created_at": "2024-05-01T10:00:00.000000+00:00",
        "updated_at": null
    })
}

fn store_for(server: &Server) -> PostgrestStore {
    PostgrestStore::new(&server.url(), "anon-key", Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_list_sends_select_filter_and_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/security_leads")
        .match_header("apikey", "anon-key")
        .match_header("authorization", "Bearer anon-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("status".into(), "eq.new".into()),
            Matcher::UrlEncoded("order".into(), "created_at.desc,id.desc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([lead_row("new")]).to_string())
        .create_async()
        .await;

    let leads = LeadRepository::from_store(std::sync::Arc::new(store_for(&server)));
    let listed = leads.list(Some(LeadStatus::New)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id.as_uuid().to_string(), LEAD_ID);
}

#[tokio::test]
async fn test_ticket_list_embeds_customer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/security_service_tickets")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "select".into(),
                "*,customer:security_customers(id,name,email,phone)".into(),
            ),
            Matcher::UrlEncoded("status".into(), "eq.in_progress".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let tickets = ServiceTicketRepository::from_store(std::sync::Arc::new(store_for(&server)));
    assert!(tickets.list(Some(TicketStatus::InProgress)).await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_insert_posts_array_and_asks_for_representation() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/security_leads")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::Regex(r#"^\[\{.*"name":"Dana Reyes".*\}\]$"#.to_string()))
        .with_status(201)
        .with_body(json!([lead_row("new")]).to_string())
        .create_async()
        .await;

    let leads = LeadRepository::from_store(std::sync::Arc::new(store_for(&server)));
    let lead = leads
        .create(NewLead::new("Dana Reyes", "dana@example.com"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(lead.status, LeadStatus::New);
}

#[tokio::test]
async fn test_update_with_no_rows_is_not_found() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/security_leads")
        .match_query(Matcher::UrlEncoded("id".into(), format!("eq.{}", LEAD_ID)))
        .match_header("prefer", "return=representation")
        .match_body(Matcher::Regex(r#""status":"won""#.to_string()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let leads = LeadRepository::from_store(std::sync::Arc::new(store_for(&server)));
    let id: LeadId = LEAD_ID.parse().unwrap();
    let err = leads.update_status(id, LeadStatus::Won).await.unwrap_err();

    mock.assert_async().await;
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_upsert_sends_conflict_column_and_merge_preference() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/security_admin_users")
        .match_query(Matcher::UrlEncoded("on_conflict".into(), "email".into()))
        .match_header("prefer", "resolution=merge-duplicates,return=representation")
        .with_status(201)
        .with_body(json!([{ "id": LEAD_ID, "email": "a@b.c" }]).to_string())
        .create_async()
        .await;

    let store = store_for(&server);
    let row = store
        .upsert("security_admin_users", json!({ "email": "a@b.c" }), "email")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(row["id"], LEAD_ID);
}

#[tokio::test]
async fn test_error_bodies_map_to_kinds() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/rest/v1/security_customers")
        .with_status(409)
        .with_body(
            json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint \"security_customers_email_key\"",
                "details": null,
                "hint": null
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/security_admin_users")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(json!({ "message": "Invalid API key" }).to_string())
        .create_async()
        .await;

    let store = store_for(&server);

    let err = store
        .insert("security_customers", json!({ "email": "dup@example.com" }))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEntry(_)));
    assert!(err.message().contains("security_customers_email_key"));

    let err = store
        .select(&Select::from("security_admin_users"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied(ref m) if m == "Invalid API key"));
}

#[tokio::test]
async fn test_update_without_filter_is_refused_locally() {
    let server = Server::new_async().await;
    let store = store_for(&server);

    let err = store
        .update("security_leads", &[], json!({ "status": "won" }))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::QueryFailed(_)));
}

#[tokio::test]
async fn test_unreachable_store_is_transport_error() {
    // port 9 (discard) is not listening in test environments
    let store = PostgrestStore::new("http://127.0.0.1:9", "anon-key", Some(Duration::from_secs(2)))
        .unwrap();
    let err = store.select(&Select::from("security_leads")).await.unwrap_err();
    assert!(err.is_connection_error());

    let health = store.health_check().await;
    assert_eq!(health.status, AdapterHealth::Unhealthy);
}

#[tokio::test]
async fn test_health_check_hits_rest_root() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/")
        .match_header("apikey", "anon-key")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let health = store_for(&server).health_check().await;

    mock.assert_async().await;
    assert_eq!(health.status, AdapterHealth::Healthy);
}

#[tokio::test]
async fn test_provider_uses_service_key_for_full_tier() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/security_admin_users")
        .match_query(Matcher::Any)
        .match_header("apikey", "service-key")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let provider = ConnectionProvider::new(
        StoreConfig::new(server.url())
            .anon_key("anon-key")
            .service_key("service-key"),
    );
    let handle = provider.client_for(Privilege::Full);
    assert_eq!(handle.backend(), StoreBackend::Postgrest);

    handle
        .store()
        .select(&Select::from("security_admin_users"))
        .await
        .unwrap();
    mock.assert_async().await;
}
