use assert_cmd::prelude::*;
use chrono::{Duration, Utc};
use serde_json::json;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orgstat() -> Command {
    let mut cmd = Command::cargo_bin("orgstat").unwrap();
    cmd.env_remove("GITHUB_USER")
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG")
        .env_remove("ORGSTAT_API_URL");
    cmd
}

async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[test]
fn missing_org_prints_usage() {
    let output = orgstat()
        .args(["--user", "octo", "--token", "secret", "--out", "-"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--org"));
    assert!(stderr.contains("Usage"));
}

#[test]
fn missing_token_prints_usage() {
    let output = orgstat()
        .args(["--org", "acme", "--user", "octo", "--out", "-"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--token"));
}

#[test]
fn unreachable_api_aborts_the_run() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.html");

    let output = orgstat()
        .env("ORGSTAT_API_URL", "http://127.0.0.1:9")
        .args(["--org", "acme", "--user", "octo", "--token", "secret", "--quiet"])
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not list repositories"));
    assert!(!out.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn renders_a_report_for_an_organisation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"public_repos": 2})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"name": "lib"}, {"name": "busy"}])),
        )
        .mount(&server)
        .await;

    let three_days_ago = (Utc::now() - Duration::days(3)).timestamp();
    Mock::given(method("GET"))
        .and(path("/repos/acme/lib/stats/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "total": 5,
            "author": {"id": 1, "login": "alice", "avatar_url": "https://avatars.example/1"},
            "weeks": [{"w": three_days_ago, "a": 1200, "d": 20, "c": 5}]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/busy/stats/contributors"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let out = dir.path().join("report.html");

    let mut cmd = orgstat();
    cmd.env("ORGSTAT_API_URL", server.uri())
        .args(["--org", "acme", "--user", "octo", "--token", "secret", "--quiet"])
        .arg("--out")
        .arg(&out);
    let output = run(cmd).await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let html = fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("5 commits in 1 repos").count(), 4);
    assert!(html.contains("1,200 ++"));
    assert!(html.contains("busy"));
    assert!(html.contains("1 of 2 repositories"));
}

#[tokio::test(flavor = "multi_thread")]
async fn json_report_goes_to_stdout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"public_repos": 0})))
        .mount(&server)
        .await;

    let mut cmd = orgstat();
    cmd.env("ORGSTAT_API_URL", server.uri()).args([
        "--org", "acme", "--user", "octo", "--token", "secret", "--quiet", "--format", "json",
        "--out", "-",
    ]);
    let output = run(cmd).await;

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["org"], "acme");
    assert_eq!(report["summary"]["attempted"], 0);
    assert_eq!(report["report"]["windows"].as_array().unwrap().len(), 4);
}
