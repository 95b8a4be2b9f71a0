use std::{fs, net::TcpListener};

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROFILE: &str = r#"<html><body>
<table id="gsc_a_t"><tbody id="gsc_a_b">
<tr class="gsc_a_tr">
  <td class="gsc_a_t"><a href="/a" class="gsc_a_at">A</a>
    <div class="gs_gray">J. Doe</div><div class="gs_gray">Nature, 100-110</div></td>
  <td class="gsc_a_y"><span class="gsc_a_h">2021</span></td>
</tr>
<tr class="gsc_a_tr">
  <td class="gsc_a_t"><a href="/a2" class="gsc_a_at">A</a>
    <div class="gs_gray">Someone Else</div><div class="gs_gray">Science, 1-2</div></td>
  <td class="gsc_a_y"><span class="gsc_a_h">2020</span></td>
</tr>
<tr class="gsc_a_tr">
  <td class="gsc_a_t"><a href="/b" class="gsc_a_at">B</a>
    <div class="gs_gray">K. Lee</div><div class="gs_gray">NoCommaHere</div></td>
  <td class="gsc_a_y"><span class="gsc_a_h">2019</span></td>
</tr>
</tbody></table></body></html>"#;

/// A profile server answering `hits` page requests for `author` with `status` and `body`.
async fn profile_server(author: &str, status: u16, body: &str, hits: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/citations"))
        .and(query_param("user", author))
        .and(query_param("cstart", "0"))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .expect(hits)
        .mount(&server)
        .await;
    server
}

fn scholarsync() -> Command {
    let mut cmd = Command::cargo_bin("scholarsync").expect("binary");
    cmd.env("NO_COLOR", "1");
    for var in [
        "http_proxy",
        "HTTP_PROXY",
        "https_proxy",
        "HTTPS_PROXY",
        "all_proxy",
        "ALL_PROXY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_persists_first_valid_publication() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = dir.path().join("publications.json");
    let server = profile_server("someone", 200, PROFILE, 1).await;

    let output = scholarsync()
        .args(["sync", "--author", "someone", "--base-url", server.uri().as_str(), "--store"])
        .arg(&store)
        .output()?;

    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert!(output.status.success(), "stderr=\n{stderr}");
    assert!(
        stderr.contains("✓ 1") && stderr.contains("✗ 1") && stderr.contains("↺ 1"),
        "stderr summary mismatch. stderr=\n{stderr}"
    );

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&store)?)?;
    assert_eq!(
        saved,
        serde_json::json!([{
            "title": "A",
            "url": format!("{}/a", server.uri()),
            "authors": "J. Doe",
            "journal": "Nature",
            "pages": "100-110",
            "pub_date": "2021"
        }])
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn second_sync_does_not_duplicate_stored_titles() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = dir.path().join("publications.json");
    let server = profile_server("someone", 200, PROFILE, 2).await;

    for _ in 0..2 {
        scholarsync()
            .args(["sync", "-a", "someone", "--base-url", server.uri().as_str(), "--store"])
            .arg(&store)
            .assert()
            .success();
    }

    let saved: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&store)?)?;
    assert_eq!(saved.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_profile_is_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = dir.path().join("publications.json");
    let server = profile_server("nobody", 404, "gone", 1).await;

    scholarsync()
        .args(["sync", "-a", "nobody", "--base-url", server.uri().as_str(), "--store"])
        .arg(&store)
        .assert()
        .success()
        .stderr(predicate::str::contains("✓ 0").and(predicate::str::contains("1/1 profiles unreachable")));

    assert!(!store.exists());
    Ok(())
}

#[test]
fn unreachable_host_is_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = dir.path().join("publications.json");
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();

    scholarsync()
        .args(["sync", "-a", "x", "-a", "y", "--base-url"])
        .arg(format!("http://127.0.0.1:{port}/"))
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stderr(predicate::str::contains("2/2 profiles unreachable"));
    Ok(())
}

#[test]
fn malformed_store_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = dir.path().join("publications.json");
    fs::write(&store, "not json")?;

    scholarsync()
        .args(["sync", "-a", "x", "--base-url", "http://127.0.0.1:9/", "--store"])
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed publication store"));
    Ok(())
}

#[test]
fn check_accepts_clean_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = dir.path().join("publications.json");
    fs::write(
        &store,
        r#"[{"title":"A","url":"u","authors":"J. Doe","journal":"Nature","pages":"1-2","pub_date":"2020"}]"#,
    )?;

    scholarsync()
        .arg("check")
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 publication(s), 0 problem(s)"));
    Ok(())
}

#[test]
fn check_reports_invalid_and_duplicate_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = dir.path().join("publications.json");
    fs::write(
        &store,
        r#"[
  {"title":"A","url":"u","authors":"J. Doe","journal":"Nature","pages":"1-2","pub_date":"2020"},
  {"title":"A","url":"u2","authors":"J. Doe","journal":"Nature","pages":"3-4","pub_date":"2020"},
  {"title":"C","url":"u3","authors":"K. Lee","journal":"Cell","pages":"2020","pub_date":"2020"}
]"#,
    )?;

    scholarsync()
        .arg("check")
        .arg("--store")
        .arg(&store)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("duplicate title")
                .and(predicate::str::contains("pages and publication date are identical"))
                .and(predicate::str::contains("2 problem(s)")),
        );
    Ok(())
}
