// ABOUTME: Integration tests for the filmbot CLI binary against a mock site.
// ABOUTME: Covers JSON output, rendered replies, output files, exit codes and argument validation.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const DETAIL: &str = r#"<html><body>
<h1 id="main-title"><span itemprop="name">El padrino</span></h1>
<div data-movie-id="809297"></div>
<dd itemprop="datePublished">1972</dd>
<dd itemprop="duration">175 min.</dd>
<dd itemprop="description">Don Vito Corleone dirige la familia. (FILMAFFINITY)</dd>
<div itemprop="ratingValue">9,0</div>
<span itemprop="ratingCount">212.450</span>
</body></html>"#;

fn filmbot_cmd(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("filmbot").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("--base-url")
        .arg(server.base_url());
    cmd
}

fn mock_detail(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/es/film809297.html");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(DETAIL);
    })
}

#[test]
fn movie_json_output() {
    let server = MockServer::start();
    let mock = mock_detail(&server);

    filmbot_cmd(&server)
        .arg("--json")
        .arg("movie")
        .arg("809297")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 809297"))
        .stdout(predicate::str::contains("\"duration\": 175"))
        .stdout(predicate::str::contains("\"average\": 9.0"));

    mock.assert();
}

#[test]
fn movie_card_output() {
    let server = MockServer::start();
    mock_detail(&server);

    filmbot_cmd(&server)
        .arg("movie")
        .arg("809297")
        .assert()
        .success()
        .stdout(predicate::str::contains("El padrino"))
        .stdout(predicate::str::contains("⌛️2 horas y 55 minutos."))
        .stdout(predicate::str::contains(
            "Ver en FilmAffinity: https://m.filmaffinity.com/es/movie.php?id=809297",
        ));
}

#[test]
fn search_redirect_renders_card_and_suggestions() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/es/search.php")
            .query_param("stext", "el padrino");
        then.status(302).header("location", "/es/film809297.html");
    });
    mock_detail(&server);

    filmbot_cmd(&server)
        .arg("search")
        .arg("el")
        .arg("padrino")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aquí tienes:"))
        .stdout(predicate::str::contains("[🎞 Sinopsis] [🏆 Premios]"));
}

#[test]
fn search_voice_prints_ssml() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/es/search.php");
        then.status(302).header("location", "/es/film809297.html");
    });
    mock_detail(&server);

    filmbot_cmd(&server)
        .arg("--voice")
        .arg("search")
        .arg("padrino")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<speak>El padrino (1972). Calificación: 9 sobre 10.",
        ));
}

#[test]
fn search_failure_exits_nonzero_with_apology() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/es/search.php");
        then.status(500);
    });

    filmbot_cmd(&server)
        .arg("search")
        .arg("padrino")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Disculpa"));
}

#[test]
fn json_search_failure_reports_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/es/search.php");
        then.status(500);
    });

    filmbot_cmd(&server)
        .arg("--json")
        .arg("search")
        .arg("padrino")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fetch error"));
}

#[test]
fn top_json_passes_filters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/es/topgen.php")
            .query_param("genre", "DR")
            .query_param("country", "ES")
            .query_param("fromyear", "1990");
        then.status(200).body(r#"<html><body><ul id="top-movies"></ul></body></html>"#);
    });

    filmbot_cmd(&server)
        .arg("--json")
        .arg("top")
        .arg("--genre")
        .arg("Drama")
        .arg("--country")
        .arg("España")
        .arg("--from")
        .arg("1990")
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));

    mock.assert();
}

#[test]
fn output_file_is_written() {
    let server = MockServer::start();
    mock_detail(&server);
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("movie.json");

    filmbot_cmd(&server)
        .arg("--json")
        .arg("-o")
        .arg(&out_path)
        .arg("movie")
        .arg("809297")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("\"title\": \"El padrino\""));
}

#[test]
fn invalid_locale_is_rejected() {
    Command::cargo_bin("filmbot")
        .unwrap()
        .arg("--locale")
        .arg("español")
        .arg("movie")
        .arg("1")
        .assert()
        .failure();
}

#[test]
fn invalid_base_url_is_rejected() {
    Command::cargo_bin("filmbot")
        .unwrap()
        .arg("--base-url")
        .arg("ftp://example.com")
        .arg("movie")
        .arg("1")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid input"));
}
