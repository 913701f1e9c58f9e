//! Tests that run the compiled `img2doc` binary.

#![cfg(feature = "cli")]

use image::{Rgb, RgbImage};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn img2doc(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_img2doc"))
        .current_dir(cwd)
        .args(args)
        .arg("--no-progress")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn captures(dir: &Path, names: &[&str]) {
    let captures = dir.join("captures");
    std::fs::create_dir(&captures).unwrap();
    for name in names {
        RgbImage::from_pixel(40, 20, Rgb([1, 2, 3]))
            .save(captures.join(name))
            .unwrap();
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn missing_folder_exits_one() {
    let dir = TempDir::new().unwrap();
    let out = img2doc(dir.path(), &["pdf"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = text(&out.stderr);
    assert!(stderr.contains("Folder not found"), "stderr: {stderr}");
    assert!(!dir.path().join("result.pdf").exists());
}

#[test]
fn empty_folder_exits_one() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("captures")).unwrap();
    let out = img2doc(dir.path(), &["docx"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = text(&out.stderr);
    assert!(stderr.contains("No 'Page_X' images found"), "stderr: {stderr}");
    assert!(!dir.path().join("result.docx").exists());
}

#[test]
fn docx_run_prints_summary() {
    let dir = TempDir::new().unwrap();
    captures(dir.path(), &["Page_1.png", "Page_2.png"]);

    let out = img2doc(dir.path(), &["docx"]);
    let stdout = text(&out.stdout);
    assert!(out.status.success(), "stderr: {}", text(&out.stderr));
    assert!(stdout.contains("=== Image to DOCX converter ==="), "{stdout}");
    assert!(stdout.contains("DOCX created:") && stdout.contains("result.docx"), "{stdout}");
    assert!(stdout.contains("Total pages: 2"), "{stdout}");
    assert!(dir.path().join("result.docx").is_file());
}

#[test]
fn creating_line_precedes_summary_without_progress_bar() {
    let dir = TempDir::new().unwrap();
    captures(dir.path(), &["Page_1.png"]);

    let out = img2doc(dir.path(), &["pdf"]);
    assert!(out.status.success(), "stderr: {}", text(&out.stderr));
    let stdout = text(&out.stdout);
    let creating = stdout.find("Creating PDF").expect(&stdout);
    let created = stdout.find("PDF created:").expect(&stdout);
    assert!(creating < created, "{stdout}");
}

#[test]
fn environment_does_not_redirect_input_or_output() {
    let dir = TempDir::new().unwrap();
    captures(dir.path(), &["Page_1.png"]);

    let out = Command::new(env!("CARGO_BIN_EXE_img2doc"))
        .current_dir(dir.path())
        .args(["pdf", "--no-progress"])
        .env_remove("RUST_LOG")
        .env("IMG2DOC_INPUT", "elsewhere")
        .env("IMG2DOC_OUTPUT", "elsewhere.pdf")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0), "stderr: {}", text(&out.stderr));
    assert!(dir.path().join("result.pdf").is_file());
    assert!(!dir.path().join("elsewhere.pdf").exists());
}

#[test]
fn docx_is_byte_identical_across_runs() {
    let dir = TempDir::new().unwrap();
    captures(dir.path(), &["Page_1.png", "Page_2.jpg"]);

    assert!(img2doc(dir.path(), &["docx", "-o", "a.docx"]).status.success());
    assert!(img2doc(dir.path(), &["docx", "-o", "b.docx"]).status.success());
    let a = std::fs::read(dir.path().join("a.docx")).unwrap();
    let b = std::fs::read(dir.path().join("b.docx")).unwrap();
    assert!(a == b);
}

#[test]
fn json_summary_and_custom_paths() {
    let dir = TempDir::new().unwrap();
    let shots = dir.path().join("shots");
    std::fs::create_dir(&shots).unwrap();
    RgbImage::from_pixel(30, 30, Rgb([9, 9, 9]))
        .save(shots.join("page_7.png"))
        .unwrap();

    let out = img2doc(dir.path(), &["pdf", "-i", "shots", "-o", "out/book.pdf", "--json"]);
    assert!(out.status.success(), "stderr: {}", text(&out.stderr));

    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["format"], "pdf");
    assert_eq!(summary["page_count"], 1);
    assert_eq!(summary["pages"][0]["file_name"], "page_7.png");
    assert!(dir.path().join("out/book.pdf").is_file());
}

#[test]
fn inspect_only_lists_order_without_writing() {
    let dir = TempDir::new().unwrap();
    let captures = dir.path().join("captures");
    std::fs::create_dir(&captures).unwrap();
    for name in ["Page_10.png", "Page_2.png", "Page_x.png"] {
        std::fs::write(captures.join(name), b"not decoded in inspect mode").unwrap();
    }

    let out = img2doc(dir.path(), &["pdf", "--inspect-only", "--json"]);
    assert!(out.status.success(), "stderr: {}", text(&out.stderr));
    let listing: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<&str> = listing["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["file_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Page_2.png", "Page_10.png", "Page_x.png"]);
    assert!(!dir.path().join("result.pdf").exists());
}
