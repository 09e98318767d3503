use currex::core::{CurrencyCode, PreferencesRepository};
use currex::store::disk::DiskStore;
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Latest-rates payload stamped with the current time, so it stays fresh.
    pub fn latest_response() -> String {
        let now = chrono::Utc::now().to_rfc3339();
        format!(
            r#"{{
                "meta": {{ "last_updated_at": "{now}" }},
                "data": {{
                    "EUR": {{ "code": "EUR", "value": 0.5 }},
                    "GBP": {{ "code": "GBP", "value": 0.8 }},
                    "USD": {{ "code": "USD", "value": 1.0 }},
                    "XYZ": {{ "code": "XYZ", "value": 2.0 }}
                }}
            }}"#
        )
    }

    pub async fn create_mock_server(status: u16, body: &str, expected_calls: u64) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/latest"))
            .and(header("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        mock_server
    }

    /// Writes a config pointing at `base_url` with data kept under `data_dir`.
    pub fn write_config(dir: &std::path::Path, base_url: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let data_path = dir.join("data");
        let config_content = format!(
            r#"
            provider:
              base_url: {}
              api_key: "test-key"
            data_path: "{}"
            source_currency: "USD"
            target_currency: "EUR"
            "#,
            base_url,
            data_path.display()
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    // The second convert runs within the same day, so the cache is fresh and
    // only one request reaches the server.
    let mock_server = test_utils::create_mock_server(200, &test_utils::latest_response(), 1).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());
    let config_path = config_path.to_str().unwrap();

    let result = currex::run_command(
        currex::AppCommand::Convert {
            amount: 10.0,
            from: None,
            to: None,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());

    let result = currex::run_command(
        currex::AppCommand::Convert {
            amount: 8.0,
            from: Some(CurrencyCode::GBP),
            to: None,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());

    for command in [currex::AppCommand::Status, currex::AppCommand::Rates] {
        info!(?command, "Running command against cached rates");
        let result = currex::run_command(command, Some(config_path)).await;
        assert!(result.is_ok(), "Command failed with: {:?}", result.err());
    }
}

#[test_log::test(tokio::test)]
async fn test_refresh_reports_api_failure() {
    let mock_server = test_utils::create_mock_server(500, "", 1).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());

    let result = currex::run_command(
        currex::AppCommand::Refresh { force: false },
        Some(config_path.to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("Refresh should fail when the API errors");
    assert_eq!(
        err.to_string(),
        "Failed to refresh rates: HTTP error: 500 Internal Server Error"
    );
}

#[test_log::test(tokio::test)]
async fn test_refresh_fails_when_no_rates_are_returned() {
    let body = format!(
        r#"{{ "meta": {{ "last_updated_at": "{}" }}, "data": {{}} }}"#,
        chrono::Utc::now().to_rfc3339()
    );
    let mock_server = test_utils::create_mock_server(200, &body, 1).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());

    let result = currex::run_command(
        currex::AppCommand::Refresh { force: true },
        Some(config_path.to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("Refresh should fail without rates");
    assert_eq!(
        err.to_string(),
        "Failed to refresh rates: no exchange rates available"
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_without_rates_fails() {
    let mock_server = test_utils::create_mock_server(200, r#"{"data": {}}"#, 1).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());

    let result = currex::run_command(
        currex::AppCommand::Convert {
            amount: 1.0,
            from: None,
            to: None,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("Convert should fail without rates");
    assert!(
        err.to_string()
            .starts_with("Conversion failed: Failed to parse exchange rate response")
    );
}

#[test_log::test(tokio::test)]
async fn test_forced_refresh_then_switch() {
    let mock_server = test_utils::create_mock_server(200, &test_utils::latest_response(), 2).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());
    let config_path = config_path.to_str().unwrap();

    for _ in 0..2 {
        let result =
            currex::run_command(currex::AppCommand::Refresh { force: true }, Some(config_path))
                .await;
        assert!(result.is_ok(), "Refresh failed with: {:?}", result.err());
    }

    let result = currex::run_command(currex::AppCommand::Switch, Some(config_path)).await;
    assert!(result.is_ok(), "Switch failed with: {:?}", result.err());

    let store = DiskStore::open(&temp_dir.path().join("data")).unwrap();
    assert_eq!(
        store.read_source_currency_code().await,
        Some(CurrencyCode::EUR)
    );
    assert_eq!(
        store.read_target_currency_code().await,
        Some(CurrencyCode::USD)
    );
}
