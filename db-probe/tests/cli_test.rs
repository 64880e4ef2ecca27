use db_probe::report::TROUBLESHOOTING;
use std::process::Command;

fn db_probe() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_db-probe"));
    // Set explicitly so a local .env cannot point the run at a real server.
    cmd.env("DATABASE_URL", "")
        .env("NODE_ENV", "test")
        .env("DB_HOST", "127.0.0.1")
        .env("DB_NAME", "app_db")
        .env("DB_USER", "postgres")
        .env("DB_PASSWORD", "");
    cmd
}

#[test]
fn unreachable_database_exits_with_status_one() {
    let output = db_probe().env("DB_PORT", "1").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Database connection failed:"), "{stdout}");
    assert!(stdout.contains(TROUBLESHOOTING[0]), "{stdout}");
}

#[test]
fn invalid_port_exits_with_status_one_before_connecting() {
    let output = db_probe().env("DB_PORT", "not-a-port").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid database configuration"), "{stderr}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Troubleshooting:"));
}
