use beem::{
    AirtimeAmount, BeemError, CallContext, Client, Credentials, MessageText, Msisdn, ReferenceId,
    SendSms, SenderId,
};
use mockito::{Matcher, Server};
use serde_json::json;

const AUTH: &str = "Basic dGVzdF9rZXk6dGVzdF9zZWNyZXQ=";

fn client_for(server: &Server) -> Client {
    let url = server.url();
    Client::builder(Credentials::new("test_key", "test_secret").unwrap())
        .sms_base_url(&url)
        .otp_base_url(&url)
        .airtime_base_url(&url)
        .topup_base_url(&url)
        .build()
        .unwrap()
}

#[tokio::test]
async fn send_sms_sends_auth_and_json_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/send")
        .match_header("authorization", AUTH)
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_header("cache-control", "no-cache")
        .match_body(Matcher::Json(json!({
            "source_addr": "INFO",
            "schedule_time": "",
            "encoding": 0,
            "message": "hello",
            "recipients": [{"recipient_id": 1, "dest_addr": "255712345678"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"successful":true,"request_id":101,"code":100,"message":"Message Submitted Successfully","valid":1,"invalid":0,"duplicates":0}"#,
        )
        .create_async()
        .await;

    let request = SendSms::new(
        SenderId::new("INFO").unwrap(),
        MessageText::new("hello").unwrap(),
        vec![Msisdn::new("255712345678").unwrap()],
    )
    .unwrap();
    let receipt = client_for(&server)
        .send_sms(&CallContext::new(), &request)
        .await
        .unwrap();

    assert!(receipt.successful);
    assert_eq!(receipt.request_id.as_deref(), Some("101"));
    mock.assert_async().await;
}

#[tokio::test]
async fn sms_balance_decodes_credit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/public/v1/vendors/balance")
        .match_header("authorization", AUTH)
        .with_status(200)
        .with_body(r#"{"data":{"credit_balance":42.5}}"#)
        .create_async()
        .await;

    let balance = client_for(&server)
        .sms_balance(&CallContext::new())
        .await
        .unwrap();

    assert_eq!(balance.credit_balance, 42.5);
    mock.assert_async().await;
}

#[tokio::test]
async fn airtime_balance_sends_app_name_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/credit-balance")
        .match_query(Matcher::UrlEncoded("app_name".into(), "AIRTIME".into()))
        .with_status(200)
        .with_body(r#"{"data":{"credit_bal":"1200"}}"#)
        .create_async()
        .await;

    let balance = client_for(&server)
        .airtime_balance(&CallContext::new())
        .await
        .unwrap();

    assert_eq!(balance.credit_balance, 1200.0);
    mock.assert_async().await;
}

#[tokio::test]
async fn no_content_leaves_raw_target_unchanged() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/hooks")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut target = String::from("untouched");
    client
        .execute(
            &CallContext::new(),
            reqwest::Method::POST,
            &format!("{}/v1/hooks", server.url()),
            Some(&json!({"ping": true})),
            &mut target,
        )
        .await
        .unwrap();

    assert_eq!(target, "untouched");
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_returns_exact_body_bytes() {
    let raw = b"\x00\xfe{\"code\":120,\"message\":\"Invalid Authentication Parameters\"}".to_vec();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/transfer")
        .with_status(401)
        .with_body(raw.clone())
        .create_async()
        .await;

    let err = client_for(&server)
        .transfer_airtime(
            &CallContext::new(),
            &Msisdn::new("255712345678").unwrap(),
            AirtimeAmount::new(500).unwrap(),
            ReferenceId::new(1),
        )
        .await
        .unwrap_err();

    match err {
        BeemError::Api { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, raw);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert_async().await;
}
