//! File-driven CLI command tests: the offline `match` and `hot` commands
//! read their candidate sets from JSON files on disk.

use std::io::Write;

use dealscope::cli::{hot_cmd, match_cmd, output};
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp file");
    f.write_all(contents.as_bytes()).expect("write temp file");
    f
}

#[test]
fn test_match_accepts_bare_candidate_array() {
    output::init(false, true);
    let f = write_temp(
        r#"[
            {"title": "Wireless Earbuds Pro", "price": 19.99},
            {"title": "Kitchen Scissors", "price": 3.99}
        ]"#,
    );

    let result = match_cmd::run(
        "Apple AirPods Pro 2 Wireless Earbuds",
        249.99,
        f.path(),
        false,
        false,
        None,
        1.0,
    );
    assert!(result.is_ok());
}

#[test]
fn test_match_accepts_wrapped_candidate_object() {
    output::init(false, true);
    let f = write_temp(
        r#"{"candidates": [{"title": "USB C Charging Cable 6ft", "price": 4.99, "category": "cable"}]}"#,
    );

    let result = match_cmd::run("USB C Cable", 12.99, f.path(), true, true, None, 0.0);
    assert!(result.is_ok());
}

#[test]
fn test_match_renders_long_multibyte_titles() {
    // Over 56 bytes, with a two-byte char straddling byte 53 — right
    // where the table renderer cuts; it must not split the codepoint.
    output::init(false, false);
    let long_title = format!("{}é Bluetooth Earbuds Premium Kit", "ab".repeat(26));
    assert!(!long_title.is_char_boundary(53));
    let f = write_temp(&format!(r#"[{{"title": "{long_title}", "price": 11.99}}]"#));

    let result = match_cmd::run("Wireless Earbuds", 49.99, f.path(), false, false, None, 0.0);
    assert!(result.is_ok());
}

#[test]
fn test_match_rejects_malformed_json() {
    output::init(false, true);
    let f = write_temp("{not json at all");

    let err = match_cmd::run("Anything", 10.0, f.path(), false, false, None, 0.0)
        .expect_err("malformed file should fail");
    assert!(err.to_string().contains("not valid JSON"));
}

#[test]
fn test_match_reports_missing_file() {
    output::init(false, true);
    let missing = std::path::Path::new("/definitely/not/here/candidates.json");

    let err = match_cmd::run("Anything", 10.0, missing, false, false, None, 0.0)
        .expect_err("missing file should fail");
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn test_hot_ranks_curated_file() {
    output::init(false, true);
    let f = write_temp(
        r#"{"hotItems": [
            {
                "id": "hot_001",
                "title": "Wireless Bluetooth Earbuds with Charging Case",
                "price": 12.99,
                "originalPrice": 39.99,
                "category": "electronics",
                "tags": ["wireless", "bluetooth", "audio"],
                "affiliateUrl": "https://example.com/hot_001"
            }
        ]}"#,
    );

    let result = hot_cmd::run("Wireless Bluetooth Headphones", 49.99, f.path(), 3);
    assert!(result.is_ok());
}
