//! Integration tests for config

#[cfg(test)]
mod tests {
    use photofetch_config::*;
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[harness]
timeout_secs = 3

[[harness.cases]]
name = "a"
url = "https://example.com/a.jpg"

[network]
retries = 5
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.harness.timeout(), Duration::from_secs(3));
        assert_eq!(
            config.harness.cases_or_samples(),
            vec![CaseConfig {
                name: "a".to_string(),
                url: "https://example.com/a.jpg".to_string(),
            }]
        );
        assert_eq!(config.network.retries, 5);
        // Unspecified fields keep their defaults
        assert_eq!(config.network.connect_timeout, 10);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let error = Config::load_from_file(std::path::Path::new("/nonexistent/photofetch.toml"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            photofetch_errors::Error::Config(photofetch_errors::ConfigError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[harness\ntimeout_secs = ").unwrap();

        let error = Config::load_from_file(temp_file.path()).await.unwrap_err();
        assert!(matches!(
            error,
            photofetch_errors::Error::Config(photofetch_errors::ConfigError::ParseError { .. })
        ));
    }

    #[tokio::test]
    async fn test_case_without_url_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[[harness.cases]]
name = "blank"
url = ""
        "#
        )
        .unwrap();

        assert!(Config::load_from_file(temp_file.path()).await.is_err());
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("PHOTOFETCH_TIMEOUT_SECS", "7");
        std::env::set_var("PHOTOFETCH_RETRIES", "0");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.harness.timeout_secs, 7);
        assert_eq!(config.network.retries, 0);

        std::env::remove_var("PHOTOFETCH_TIMEOUT_SECS");
        std::env::remove_var("PHOTOFETCH_RETRIES");
    }

    #[test]
    fn test_merge_env_rejects_garbage() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("PHOTOFETCH_TIMEOUT_SECS", "soon");

        let mut config = Config::default();
        let result = config.merge_env();

        std::env::remove_var("PHOTOFETCH_TIMEOUT_SECS");
        assert!(result.is_err());
    }
}
