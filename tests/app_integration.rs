use std::fs;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn mount_countries(mock_server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path("/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub async fn mount_currency(mock_server: &MockServer, code: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/currency/{code}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub const TWO_COUNTRIES: &str = r#"{"countries": [
        {"sISOCode": "US", "sName": "United States"},
        {"sISOCode": "FR", "sName": "France"}
    ]}"#;
}

#[test_log::test(tokio::test)]
async fn test_currency_refresh_records_partial_failure() {
    use bankctl::core::aggregate::{Aggregator, FetchPolicy};
    use bankctl::providers::gateway::GatewayClient;
    use wiremock::MockServer;

    let mock_server = MockServer::start().await;
    test_utils::mount_countries(&mock_server, test_utils::TWO_COUNTRIES).await;
    test_utils::mount_currency(
        &mock_server,
        "US",
        200,
        r#"{"sISOCode": "USD", "sName": "US Dollar"}"#,
    )
    .await;
    test_utils::mount_currency(&mock_server, "FR", 500, "").await;

    let gateway = GatewayClient::new(&mock_server.uri());
    let mut aggregator = Aggregator::new(&gateway, &gateway);
    aggregator.refresh_policy = FetchPolicy::Sequential {
        pause: std::time::Duration::ZERO,
    };

    let result = aggregator.refresh_all(&|_, _| {}).await;
    info!("Aggregate result: {result:#?}");

    assert_eq!(result.len(), 2);

    assert_eq!(result[0].country_code, "US");
    assert_eq!(result[0].currency_code, "USD");
    assert_eq!(result[0].currency_name, "US Dollar");
    assert!(result[0].error.is_none());

    assert_eq!(result[1].country_code, "FR");
    assert_eq!(result[1].currency_code, "Error");
    assert_eq!(result[1].currency_name, "Failed to fetch");
    assert_eq!(result[1].error.as_deref(), Some("HTTP error! status: 500"));
}

#[test_log::test(tokio::test)]
async fn test_retry_recovers_after_upstream_comes_back() {
    use bankctl::core::aggregate::{Aggregator, FetchPolicy, RetryOutcome};
    use bankctl::providers::gateway::GatewayClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    test_utils::mount_countries(&mock_server, test_utils::TWO_COUNTRIES).await;
    test_utils::mount_currency(
        &mock_server,
        "US",
        200,
        r#"{"sISOCode": "USD", "sName": "US Dollar"}"#,
    )
    .await;

    // FR fails exactly once, then serves a valid payload
    Mock::given(method("GET"))
        .and(path("/currency/FR"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    test_utils::mount_currency(
        &mock_server,
        "FR",
        200,
        r#"{"sISOCode": "EUR", "sName": "Euro"}"#,
    )
    .await;

    let gateway = GatewayClient::new(&mock_server.uri());
    let mut aggregator = Aggregator::new(&gateway, &gateway);
    aggregator.refresh_policy = FetchPolicy::Sequential {
        pause: std::time::Duration::ZERO,
    };

    aggregator.refresh_all(&|_, _| {}).await;
    assert_eq!(aggregator.failure_count(), 1);

    let outcome = aggregator.retry_failed(&|_, _| {}).await;
    assert_eq!(
        outcome,
        RetryOutcome::Retried {
            recovered: 1,
            still_failing: 0
        }
    );

    let result = aggregator.result();
    assert_eq!(result[1].country_code, "FR");
    assert_eq!(result[1].currency_code, "EUR");
    assert_eq!(result[1].currency_name, "Euro");
    assert!(result[1].error.is_none());
}

#[test_log::test(tokio::test)]
async fn test_country_fallback_when_gateway_is_down() {
    use bankctl::core::aggregate::{Aggregator, FetchPolicy, MAX_COUNTRIES};
    use bankctl::providers::gateway::GatewayClient;

    // nothing listens here; both the country list and every currency lookup
    // fail, so the fallback table drives an all-error result
    let gateway = GatewayClient::new("http://127.0.0.1:1");
    let mut aggregator = Aggregator::new(&gateway, &gateway);
    aggregator.refresh_policy = FetchPolicy::Sequential {
        pause: std::time::Duration::ZERO,
    };

    let result = aggregator.refresh_all(&|_, _| {}).await;
    assert_eq!(result.len(), 25);
    assert!(result.len() <= MAX_COUNTRIES);
    assert!(result.iter().all(|r| r.is_failed()));
    assert_eq!(result[0].country_code, "US");
}

fn write_config(gateway_url: &str, transactions_url: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
services:
  gateway:
    base_url: "{gateway_url}"
  transactions:
    base_url: "{transactions_url}"
default_currency: "USD"
"#,
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    config_file
}

#[test_log::test(tokio::test)]
async fn test_full_currency_flow_via_run_command() {
    use wiremock::MockServer;

    let mock_server = MockServer::start().await;
    test_utils::mount_countries(&mock_server, test_utils::TWO_COUNTRIES).await;
    test_utils::mount_currency(
        &mock_server,
        "US",
        200,
        r#"{"CountryCurrencyResponse": {"CountryCurrencyResult": {
            "sISOCode": "USD", "sName": "US Dollar"}}}"#,
    )
    .await;
    test_utils::mount_currency(
        &mock_server,
        "FR",
        200,
        r#"{"CountryCurrencyResult": {"sISOCode": "EUR", "sName": "Euro"}}"#,
    )
    .await;

    let config_file = write_config(&mock_server.uri(), &mock_server.uri());
    let result = bankctl::run_command(
        bankctl::AppCommand::Currencies {
            retry_failed: false,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "run failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_transaction_history_via_run_command() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"transactions": [
                {"transactionId": "tx-1", "amount": 100.0, "currency": "USD",
                 "fromAccount": "ACC1", "toAccount": "ACC2",
                 "status": "COMPLETED", "createdAt": "2026-08-25T09:00:00"}
            ], "count": 1, "status": "SUCCESS"}"#,
        ))
        .mount(&mock_server)
        .await;

    let config_file = write_config(&mock_server.uri(), &mock_server.uri());
    let result = bankctl::run_command(
        bankctl::AppCommand::Transactions,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "run failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_transaction_history_rejects_bare_array() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let config_file = write_config(&mock_server.uri(), &mock_server.uri());
    let result = bankctl::run_command(
        bankctl::AppCommand::Transactions,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_payment_submission_via_run_command() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"transactionId": "tx-42", "status": "COMPLETED",
                "amount": 99.5, "currency": "USD",
                "message": "Payment accepted"}"#,
        ))
        .mount(&mock_server)
        .await;

    let config_file = write_config(&mock_server.uri(), &mock_server.uri());
    let result = bankctl::run_command(
        bankctl::AppCommand::Pay(bankctl::PayOptions {
            amount: 99.5,
            currency: None,
            from_account: "ACC12345".to_string(),
            to_account: "ACC67890".to_string(),
        }),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "run failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_rejected_payment_surfaces_upstream_message() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"message": "Fraud check failed"}"#),
        )
        .mount(&mock_server)
        .await;

    let config_file = write_config(&mock_server.uri(), &mock_server.uri());
    let result = bankctl::run_command(
        bankctl::AppCommand::Pay(bankctl::PayOptions {
            amount: 10000.0,
            currency: Some("EUR".to_string()),
            from_account: "ACCBLOCKED".to_string(),
            to_account: "ACC67890".to_string(),
        }),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Fraud check failed");
}
