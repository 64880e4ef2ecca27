use db_probe::report::TROUBLESHOOTING;
use db_probe::ProbeConfig;
use std::collections::HashMap;

fn config(pairs: &[(&str, &str)]) -> ProbeConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ProbeConfig::resolve(|key| map.get(key).cloned()).unwrap()
}

#[tokio::test]
async fn unreachable_database_prints_troubleshooting() {
    // Nothing listens on port 1; the connection is refused immediately.
    let config = config(&[("DB_HOST", "127.0.0.1"), ("DB_PORT", "1")]);
    let mut out = Vec::new();

    let result = db_probe::run(&config, &mut out).await;

    assert!(result.is_err());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("host:     127.0.0.1"));
    assert!(text.contains("port:     1"));
    assert!(text.contains("Database connection failed:"));
    assert!(text.contains("Troubleshooting:"));
    for hint in TROUBLESHOOTING {
        assert!(text.contains(hint), "missing hint {hint:?}");
    }
    assert!(!text.contains("Connected."));
}

#[tokio::test]
async fn malformed_connection_string_fails_without_connecting() {
    let config = config(&[("DATABASE_URL", "not a url")]);
    let mut out = Vec::new();

    let result = db_probe::run(&config, &mut out).await;

    assert!(result.is_err());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("could not be parsed"));
    assert!(text.contains("invalid connection settings"));
    assert!(text.contains("Troubleshooting:"));
}

/// Needs a reachable PostgreSQL in `DATABASE_URL`.
#[tokio::test]
#[ignore = "Requires a running PostgreSQL (set DATABASE_URL)"]
async fn reachable_database_reports_version_and_tables() {
    dotenvy::dotenv().ok();
    let config = ProbeConfig::from_env().expect("valid probe configuration");
    let mut out = Vec::new();

    let report = db_probe::run(&config, &mut out)
        .await
        .expect("probe should succeed against a live database");

    let text = String::from_utf8(out).unwrap();
    assert!(report.version.starts_with("PostgreSQL"));
    assert!(text.contains("Connected."));
    assert!(text.contains(&format!(
        "Tables in public schema: {}",
        report.tables.len()
    )));
    if report.tables.is_empty() {
        assert!(text.contains("initialization"));
    }
}
