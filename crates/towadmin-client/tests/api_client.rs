//! HTTP-level tests for the admin API client

use serde_json::json;
use towadmin_client::{keys, ApiClient};
use towadmin_core::types::{
    CommandCenterPayload, FeePayload, LoginRequest, ResetPasswordRequest, UserRole,
};
use towadmin_core::Error;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok_body(data: serde_json::Value) -> serde_json::Value {
    json!({ "status": "ok", "message": null, "data": data })
}

#[tokio::test]
async fn get_resource_attaches_bearer_token_and_unwraps_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admins/users/"))
        .and(header("authorization", "Bearer sekret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([
            { "id": "1", "first_name": "Ada", "last_name": "Obi" }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins").with_token("sekret");
    let data = client
        .get_resource(keys::USERS)
        .await
        .unwrap_or_else(|e| panic!("fetch should succeed: {e}"));

    let rows = data.as_array().map_or(0, Vec::len);
    assert_eq!(rows, 1);
    assert_eq!(data[0]["first_name"], "Ada");
}

#[tokio::test]
async fn get_resource_passes_query_suffixed_keys_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admins/settings/fees"))
        .and(query_param("component", "count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({ "count": 7 }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    let data = client
        .get_resource(keys::FEES_COUNT)
        .await
        .unwrap_or_else(|e| panic!("fetch should succeed: {e}"));

    assert_eq!(data["count"], 7);
}

#[tokio::test]
async fn non_ok_envelope_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admins/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "message": "token expired",
            "data": null
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    let err = client
        .get_resource(keys::USERS)
        .await
        .err()
        .unwrap_or_else(|| panic!("fetch should fail"));

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, "failed");
            assert_eq!(message, "token expired");
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn http_error_status_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/admins/accounts/admin-user/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "not_found",
            "message": "admin user not found"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    let err = client
        .delete_admin_user("9")
        .await
        .err()
        .unwrap_or_else(|| panic!("delete should fail"));

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, "not_found");
            assert_eq!(message, "admin user not found");
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn login_builds_session_from_claims() {
    let server = MockServer::start().await;

    let request = LoginRequest {
        email: "ops@towing.example".to_string(),
        password: "correct-horse".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/admins/auths/login"))
        .and(body_json(&request))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
            "access_token": "tok-123",
            "role": "super_admin",
            "first_name": "Ada",
            "last_name": "Obi"
        }))))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    let session = client
        .login(&request)
        .await
        .unwrap_or_else(|e| panic!("login should succeed: {e}"));

    assert_eq!(session.token, "tok-123");
    assert_eq!(session.role, UserRole::SuperAdmin);
    assert_eq!(session.display_name, "Ada Obi");
}

#[tokio::test]
async fn login_without_access_token_is_an_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admins/auths/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({ "role": "admin" }))))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    let request = LoginRequest {
        email: "ops@towing.example".to_string(),
        password: "correct-horse".to_string(),
    };

    match client.login(&request).await {
        Err(Error::Authentication(_)) => {}
        other => panic!("expected Authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn reset_password_posts_the_email() {
    let server = MockServer::start().await;

    let request = ResetPasswordRequest {
        email: "ops@towing.example".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/admins/auths/reset-password"))
        .and(body_json(&request))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    client
        .reset_password(&request)
        .await
        .unwrap_or_else(|e| panic!("reset should succeed: {e}"));
}

#[tokio::test]
async fn logout_hits_the_session_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admins/accounts/auth/logout/"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins").with_token("tok");
    client
        .logout()
        .await
        .unwrap_or_else(|e| panic!("logout should succeed: {e}"));
}

#[tokio::test]
async fn create_fee_posts_the_component() {
    let server = MockServer::start().await;

    let payload = FeePayload {
        component: "per_km".to_string(),
        amount: 2500,
    };

    Mock::given(method("POST"))
        .and(path("/admins/settings/fees"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
            "id": "7",
            "component": "per_km",
            "amount": 2500
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    let created = client
        .create_fee(&payload)
        .await
        .unwrap_or_else(|e| panic!("create should succeed: {e}"));

    assert_eq!(created["id"], "7");
    assert_eq!(created["amount"], 2500);
}

#[tokio::test]
async fn update_fee_patches_by_id() {
    let server = MockServer::start().await;

    let payload = FeePayload {
        component: "base".to_string(),
        amount: 10_000,
    };

    Mock::given(method("PATCH"))
        .and(path("/admins/settings/fees/7"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
            "id": "7",
            "component": "base",
            "amount": 10_000
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    let updated = client
        .update_fee("7", &payload)
        .await
        .unwrap_or_else(|e| panic!("update should succeed: {e}"));

    assert_eq!(updated["amount"], 10_000);
}

#[tokio::test]
async fn create_command_center_posts_the_payload() {
    let server = MockServer::start().await;

    let payload = CommandCenterPayload {
        name: "Lekki Hub".to_string(),
        phone: "+2348000000000".to_string(),
        address: Some("1 Admiralty Way".to_string()),
    };

    Mock::given(method("POST"))
        .and(path("/admins/settings/command-centers/"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
            "id": "3",
            "name": "Lekki Hub"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");
    let created = client
        .create_command_center(&payload)
        .await
        .unwrap_or_else(|e| panic!("create should succeed: {e}"));

    assert_eq!(created["name"], "Lekki Hub");
}

#[tokio::test]
async fn bank_lists_and_operator_detail_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admins/settings/bank-lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!([
            { "code": "001", "name": "First Bank" }
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admins/users/operators/42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
            "id": "42",
            "company_name": "Haulage & Co"
        }))))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), "/admins");

    let banks = client
        .bank_lists()
        .await
        .unwrap_or_else(|e| panic!("bank list should load: {e}"));
    assert_eq!(banks[0]["name"], "First Bank");

    let operator = client
        .get_resource(&keys::operator_detail("42"))
        .await
        .unwrap_or_else(|e| panic!("operator detail should load: {e}"));
    assert_eq!(operator["company_name"], "Haulage & Co");
}
