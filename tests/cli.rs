//! End-to-end tests for the `folio` binary against the demo site

use folio::rendering::{EMPTY_MESSAGE, FAILURE_MESSAGE};
use std::process::{Command, Output};

fn folio(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(args)
        .output()
        .expect("run folio")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_filter_with_page_control() {
    // The source path is resolved next to the page, not the working directory
    let out = folio(&["--page", "demos/site/index.html", "--filter", "web"]);
    assert!(out.status.success());

    let html = stdout(&out);
    assert!(html.contains("Northwind Storefront"));
    assert!(html.contains("Lumen Dashboard"));
    assert!(!html.contains("Tidal Type Specimen"));
    assert!(!html.contains("Harbor Coffee Identity"));
}

#[test]
fn test_filter_without_control_falls_back_to_renderer() {
    let out = folio(&["--page", "demos/site/index.html", "--filter", "print"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains(EMPTY_MESSAGE));

    let out = folio(&["--page", "demos/site/index.html", "--filter", "print", "--json"]);
    assert!(out.status.success());
    let snap: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json snapshot");
    assert_eq!(snap["current_filter"], "print");
    // No control selects "print", so the marker stays on "All"
    let active: Vec<&str> = snap["filters"]
        .as_array()
        .expect("filters")
        .iter()
        .filter(|c| c["classes"].as_array().map_or(false, |cls| cls.contains(&"active".into())))
        .filter_map(|c| c["label"].as_str())
        .collect();
    assert_eq!(active, vec!["All"]);
}

#[test]
fn test_failed_load_prints_failure_and_succeeds() {
    let out = folio(&["--page", "demos/site/index.html", "--source", "missing.json"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains(FAILURE_MESSAGE));
    assert!(String::from_utf8_lossy(&out.stderr).contains("folio:"));
}

#[test]
fn test_bare_page_reads_source_from_working_directory() {
    let out = folio(&["--source", "demos/site/projects.json"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).matches("class=\"card-title\"").count(), 4);
}

#[test]
fn test_missing_page_is_an_error() {
    let out = folio(&["--page", "demos/nowhere/index.html"]);
    assert_eq!(out.status.code(), Some(1));
}

#[cfg(feature = "http")]
#[test]
fn test_http_source() {
    use tiny_http::{Response, Server};

    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = match request.url() {
                "/projects.json" => Response::from_string(
                    r#"[{"title": "Remote", "category": "web", "image": "r.jpg"}]"#,
                ),
                _ => Response::from_string("Not Found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    let url = format!("http://{}/projects.json", addr);
    let out = folio(&["--page", "demos/site/index.html", "--source", &url]);
    assert!(out.status.success());
    let html = stdout(&out);
    assert!(html.contains("Remote"));
    assert!(!html.contains("Northwind Storefront"));
}
