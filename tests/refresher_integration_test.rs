//! End-to-end tests for the refresh loop: secret directory in, rendered
//! registry auth config out, and shutdown latency.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::watch;

use regcred_refresher::config::RefresherConfig;
use regcred_refresher::refresher::Refresher;

fn config_for(secret_dir: &Path, destination: &Path, sleep_interval: u64) -> RefresherConfig {
    RefresherConfig {
        secret_file_path: secret_dir.to_path_buf(),
        docker_config: destination.to_path_buf(),
        sleep_interval,
        debug: false,
    }
}

fn write_secrets(dir: &Path, username: &str, password: &str, registries: &str) {
    fs::write(dir.join("username"), username).unwrap();
    fs::write(dir.join("password"), password).unwrap();
    fs::write(dir.join("registries"), registries).unwrap();
}

#[test]
fn test_renders_exact_document_from_secret_dir() {
    let secrets = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_secrets(secrets.path(), "bob", "hunter2", "docker.io,quay.io");
    let dest = out.path().join("config.json");

    Refresher::new(config_for(secrets.path(), &dest, 120))
        .refresh_once()
        .unwrap();

    let expected = concat!(
        "{\n",
        "  \"auths\": {\n",
        "    \"docker.io\": {\n",
        "      \"auth\": \"Ym9iOmh1bnRlcjI=\",\n",
        "      \"email\": \"\"\n",
        "    },\n",
        "    \"quay.io\": {\n",
        "      \"auth\": \"Ym9iOmh1bnRlcjI=\",\n",
        "      \"email\": \"\"\n",
        "    }\n",
        "  }\n",
        "}"
    );
    assert_eq!(fs::read_to_string(&dest).unwrap(), expected);
}

#[test]
fn test_rotated_credentials_are_picked_up_next_pass() {
    let secrets = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_secrets(secrets.path(), "bob", "hunter2", "docker.io");
    let dest = out.path().join("config.json");
    let refresher = Refresher::new(config_for(secrets.path(), &dest, 120));

    refresher.refresh_once().unwrap();
    let before = fs::read_to_string(&dest).unwrap();
    assert!(before.contains("Ym9iOmh1bnRlcjI="));

    // Secret rotation shows up as changed file content.
    write_secrets(secrets.path(), "bob", "rotated", "docker.io");
    refresher.refresh_once().unwrap();
    let after = fs::read_to_string(&dest).unwrap();
    assert!(!after.contains("Ym9iOmh1bnRlcjI="));
}

#[test]
fn test_duplicate_registries_collapse_in_output() {
    let secrets = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_secrets(secrets.path(), "u", "p", "a,b,a");
    let dest = out.path().join("config.json");

    Refresher::new(config_for(secrets.path(), &dest, 120))
        .refresh_once()
        .unwrap();

    let written = fs::read_to_string(&dest).unwrap();
    assert_eq!(written.matches("\"auth\":").count(), 2);
}

#[test]
fn test_missing_destination_parent_leaves_nothing_behind() {
    let secrets = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_secrets(secrets.path(), "u", "p", "r");
    let dest = out.path().join("missing").join("config.json");

    let err = Refresher::new(config_for(secrets.path(), &dest, 120)).refresh_once();
    assert!(err.is_err());
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_shutdown_mid_sleep_exits_promptly() {
    let secrets = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_secrets(secrets.path(), "u", "p", "r");
    let dest = out.path().join("config.json");

    // An hour-long interval: if shutdown had to wait out the sleep, the
    // timeouts below would trip.
    let refresher = Refresher::new(config_for(secrets.path(), &dest, 3600));
    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(async move { refresher.run(rx).await });

    let written = dest.clone();
    tokio::time::timeout(Duration::from_secs(5), async move {
        while !written.exists() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("first pass should write the config quickly");

    tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("shutdown must interrupt the sleep, not wait it out")
        .unwrap()
        .unwrap();
}
