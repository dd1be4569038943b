use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wt(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wt").expect("binary exists");
    cmd.env("WT_CONFIG_DIR", config_dir);
    cmd.env_remove("WT_API_ENDPOINT");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn read_settings(config_dir: &Path) -> Value {
    let text = fs::read_to_string(config_dir.join("settings.json")).expect("settings written");
    serde_json::from_str(&text).expect("settings parse")
}

#[test]
fn no_arguments_prints_usage() {
    let tmp = tempdir().expect("temp dir");
    wt(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("from=<code>"))
        .stdout(predicate::str::contains("EXAMPLES"));
    assert!(!tmp.path().join("settings.json").exists());
}

#[test]
fn options_without_query_are_saved() {
    let tmp = tempdir().expect("temp dir");
    wt(tmp.path())
        .args(["from=en", "to=es,fr,de,xx"])
        .assert()
        .success();

    let saved = read_settings(tmp.path());
    assert_eq!(saved["source_language"], "en");
    assert_eq!(saved["target_languages"], json!(["de", "en", "es", "fr"]));
}

#[test]
fn to_replaces_previous_targets() {
    let tmp = tempdir().expect("temp dir");
    wt(tmp.path()).args(["to=ru,lv"]).assert().success();
    wt(tmp.path()).args(["to=lt"]).assert().success();

    let saved = read_settings(tmp.path());
    assert_eq!(saved["target_languages"], json!(["en", "lt"]));
}

#[test]
fn settings_flag_prints_path_and_contents() {
    let tmp = tempdir().expect("temp dir");
    let expected_path = tmp.path().join("settings.json");
    wt(tmp.path())
        .arg("-settings")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}:", expected_path.display())))
        .stdout(predicate::str::contains("  \"target_languages\": [\n    \"en\",\n    \"es\",\n    \"fr\"\n  ]"))
        .stdout(predicate::str::contains("\"source_language\": \"en\""));
}

#[test]
fn corrupt_settings_file_fails() {
    let tmp = tempdir().expect("temp dir");
    fs::write(tmp.path().join("settings.json"), "{ nope").expect("write settings");
    wt(tmp.path())
        .arg("-settings")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse settings file"));
}

async fn mock_wikipedia() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/en/w/api.php"))
        .and(query_param("action", "opensearch"))
        .and(query_param("search", "aardvark"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "aardvark",
            ["Aardvark"],
            [""],
            ["https://en.wikipedia.org/wiki/Aardvark"]
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("titles", "Aardvark"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"pages": {"1262": {"title": "Aardvark", "langlinks": [
                {"lang": "fr", "url": "https://fr.wikipedia.org/wiki/Oryct%C3%A9rope", "*": "Oryctérope"},
                {"lang": "es", "url": "https://es.wikipedia.org/wiki/Orycteropus_afer", "*": "Oricteropo"}
            ]}}}
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn query_prints_one_line_per_language() {
    let server = mock_wikipedia().await;
    let tmp = tempdir().expect("temp dir");

    let assert = wt(tmp.path())
        .env("WT_API_ENDPOINT", format!("{}/{{lang}}/w/api.php", server.uri()))
        .args(["to=es,fr,ru", "aardvark"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("en: {:<30} https://en.wikipedia.org/wiki/Aardvark", "Aardvark"),
            format!("es: {:<30} https://es.wikipedia.org/wiki/Orycteropus_afer", "Oricteropo"),
            format!("fr: {:<30} https://fr.wikipedia.org/wiki/Oryct%C3%A9rope", "Oryctérope"),
            "ru: ???".to_string(),
        ]
    );

    // A plain query does not persist its overrides.
    assert!(!tmp.path().join("settings.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn query_with_save_persists_overrides() {
    let server = mock_wikipedia().await;
    let tmp = tempdir().expect("temp dir");

    wt(tmp.path())
        .env("WT_API_ENDPOINT", format!("{}/{{lang}}/w/api.php", server.uri()))
        .args(["aardvark", "to=es", "-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("es: Oricteropo"));

    let saved = read_settings(tmp.path());
    assert_eq!(saved["target_languages"], json!(["en", "es"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_term_fails_without_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["zzqx", [], [], []])))
        .mount(&server)
        .await;
    let tmp = tempdir().expect("temp dir");

    wt(tmp.path())
        .env("WT_API_ENDPOINT", format!("{}/{{lang}}/w/api.php", server.uri()))
        .arg("zzqx")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no results for \"zzqx\""));
}

#[test]
fn rust_log_enables_debug_output() {
    let tmp = tempdir().expect("temp dir");
    wt(tmp.path())
        .env("RUST_LOG", "wt=debug")
        .arg("-settings")
        .assert()
        .success()
        .stderr(predicate::str::contains("settings saved"));
}

#[test]
fn default_log_level_hides_debug_output() {
    let tmp = tempdir().expect("temp dir");
    wt(tmp.path())
        .arg("-settings")
        .assert()
        .success()
        .stderr(predicate::str::contains("settings saved").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn failure_is_reported_once_without_colour() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["zzqx", [], [], []])))
        .mount(&server)
        .await;
    let tmp = tempdir().expect("temp dir");

    let assert = wt(tmp.path())
        .env("WT_API_ENDPOINT", format!("{}/{{lang}}/w/api.php", server.uri()))
        .arg("zzqx")
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("stderr utf8");
    assert_eq!(stderr.matches("no results for").count(), 1, "stderr: {stderr}");
    assert!(!stderr.contains('\u{1b}'), "unexpected escape codes: {stderr:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn html_body_is_reported_as_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let tmp = tempdir().expect("temp dir");

    wt(tmp.path())
        .env("WT_API_ENDPOINT", format!("{}/{{lang}}/w/api.php", server.uri()))
        .arg("aardvark")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed response"))
        .stderr(predicate::str::contains("<html>oops</html>"));
}
