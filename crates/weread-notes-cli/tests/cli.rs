use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "《示例之书》\n作者：某人  10个笔记\n第一章\n◆ 这是一句高亮\n原文：这是原文内容\n这是我的想法\n";

const FORMATTED: &str = "# 《示例之书》\n\n作者：某人  10个笔记\n\n## 第一章\n\n```txt\n◆ 这是一句高亮\n```\n\n> 这是原文内容\n\n这是我的想法\n";

#[test]
fn format_from_stdin_to_stdout() {
    cargo_bin_cmd!("weread-notes")
        .arg("format")
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(FORMATTED)
        .stderr(predicate::str::contains("笔记格式化完成！"));
}

#[test]
fn format_to_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("读书笔记.txt");
    let output = dir.path().join("读书笔记.md");
    std::fs::write(&input, SAMPLE).unwrap();

    cargo_bin_cmd!("weread-notes")
        .arg("format")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    assert_eq!(std::fs::read_to_string(&output).unwrap(), FORMATTED);
    assert_eq!(std::fs::read_to_string(&input).unwrap(), SAMPLE);
}

#[test]
fn format_in_place_with_yes() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("读书笔记.md");
    std::fs::write(&file, SAMPLE).unwrap();

    cargo_bin_cmd!("weread-notes")
        .args(["format", "--in-place", "--yes"])
        .arg(&file)
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&file).unwrap(), FORMATTED);
}

#[test]
fn format_in_place_asks_first() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("读书笔记.md");
    std::fs::write(&file, SAMPLE).unwrap();

    cargo_bin_cmd!("weread-notes")
        .args(["format", "--in-place"])
        .arg(&file)
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("是否要格式化文档 \"读书笔记\"？"));

    assert_eq!(std::fs::read_to_string(&file).unwrap(), SAMPLE);
}

#[test]
fn quotes_lists_targets() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("notes.md");
    std::fs::write(&file, FORMATTED).unwrap();

    cargo_bin_cmd!("weread-notes")
        .arg("quotes")
        .arg(&file)
        .assert()
        .success()
        .stdout("1. 这是原文内容\n   这是我的想法\n");
}

#[test]
fn config_set_then_show() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    cargo_bin_cmd!("weread-notes")
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "model_name", "deepseek-chat"])
        .assert()
        .success();

    cargo_bin_cmd!("weread-notes")
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "api_key", "sk-secret-value"])
        .assert()
        .success();

    cargo_bin_cmd!("weread-notes")
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("model_name = deepseek-chat")
                .and(predicate::str::contains("api_key = sk-****"))
                .and(predicate::str::contains("sk-secret-value").not())
                .and(predicate::str::contains("reflection: disabled")),
        );
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("weread-notes")
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["config", "set", "temperature", "0.7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting 'temperature'"));
}

#[test]
fn reflect_requires_configuration() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("weread-notes")
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["reflect", "--quote", "这是原文内容"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reflection is not configured"));
}

#[test]
fn rust_log_enables_debug_output() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("weread-notes")
        .env("RUST_LOG", "debug")
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["config", "path"])
        .assert()
        .success()
        .stderr(predicate::str::contains("config path:"));
}

#[test]
fn debug_output_is_quiet_by_default() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("weread-notes")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["config", "path"])
        .assert()
        .success()
        .stderr(predicate::str::contains("config path:").not());
}
