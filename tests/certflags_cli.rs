use std::io::Write;
use std::process::Command;

fn run(args: &[&str]) -> (String, String, i32) {
    run_with_env(args, &[])
}

fn run_with_env(args: &[&str], envs: &[(&str, &str)]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_certflags"))
        .args(args)
        .envs(envs.iter().copied())
        .env_remove("CERTFLAGS_CONFIG")
        .output()
        .expect("certflags binary runs in tests");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

#[test]
fn test_help_renders_registry() {
    let (stdout, _stderr, code) = run(&["--", "--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Basic options:"));
    assert!(stdout.contains(" --siteid:"));
    assert!(stdout.contains(" --emailaddress:"));
    assert_eq!(stdout.matches(" --validationmode:").count(), 1);
}

#[test]
fn test_question_mark_requests_help() {
    let (stdout, _stderr, code) = run(&["--", "--renew", "-?"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(" --renew:"));
}

#[test]
fn test_binds_options_as_text() {
    let (stdout, _stderr, code) = run(&[
        "--",
        "--target",
        "manual",
        "--host",
        "www.example.com,example.com",
        "--webroot",
        "/var/www",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("target: manual"));
    assert!(stdout.contains("host: www.example.com,example.com"));
    assert!(stdout.contains("webroot: /var/www"));
    assert!(stdout.contains("validationmode: http-01 (default)"));
}

#[test]
fn test_binds_options_as_json() {
    let (stdout, _stderr, code) = run(&[
        "--format",
        "json",
        "--",
        "--validationmode",
        "dns-01",
        "--validation",
        "dnsscript",
        "--dnscreatescript",
        "path/to/create.sh",
        "--dnsdeletescript",
        "path/to/delete.sh",
    ]);
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(value["validation"]["validation_mode"], "dns-01");
    assert_eq!(value["validation"]["validation"], "dnsscript");
    assert_eq!(value["validation"]["dns_create_script"], "path/to/create.sh");
    assert_eq!(value["validation"]["dns_delete_script"], "path/to/delete.sh");
    assert_eq!(value["installation"]["ssl_port"], 443);
}

#[test]
fn test_json_masks_secrets_unless_requested() {
    let args = [
        "--",
        "--validation",
        "webdav",
        "--password",
        "correct-horse",
    ];
    let (stdout, _stderr, code) = run(&[&["--format", "json"][..], &args[..]].concat());
    assert_eq!(code, 0);
    assert!(stdout.contains("****orse"));
    assert!(!stdout.contains("correct-horse"));

    let (stdout, _stderr, code) =
        run(&[&["--format", "json", "--show-secrets"][..], &args[..]].concat());
    assert_eq!(code, 0);
    assert!(stdout.contains("correct-horse"));
}

#[test]
fn test_unknown_flag_exits_with_parse_error() {
    let (stdout, stderr, code) = run(&["--", "--unknownflag", "value"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("unknown flag: --unknownflag"));
}

#[test]
fn test_missing_value_exits_with_parse_error() {
    let (_stdout, stderr, code) = run(&["--", "--renew", "--friendlyname"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("missing value for --friendlyname"));
}

#[test]
fn test_missing_site_id_exits_with_validation_error() {
    let (_stdout, stderr, code) = run(&["--", "--target", "iissite"]);
    assert_eq!(code, 3);
    assert!(stderr.contains("--siteid is required when target=iissite"));
}

#[test]
fn test_report_policy_from_environment() {
    let (stdout, _stderr, code) = run_with_env(
        &["--", "--target", "iissite"],
        &[("CERTFLAGS_VALIDATION_POLICY", "report")],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("target: iissite"));
}

#[test]
fn test_settings_file_controls_help_layout() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[help]\nindent = 30\nwidth = 90").unwrap();
    file.flush().unwrap();
    let path = file.path().to_string_lossy().to_string();

    let (stdout, _stderr, code) = run(&["--config", &path, "--", "--help"]);
    assert_eq!(code, 0);
    let renew = stdout
        .lines()
        .find(|line| line.starts_with(" --renew:"))
        .expect("renew entry");
    assert_eq!(renew.find("Check").unwrap(), 30);
    assert!(stdout.lines().all(|line| line.len() <= 90));
}

#[test]
fn test_invalid_settings_file_is_runtime_error() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[help]\nindent = 30\nwidth = 35").unwrap();
    file.flush().unwrap();
    let path = file.path().to_string_lossy().to_string();

    let (_stdout, stderr, code) = run(&["--config", &path, "--", "--renew"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("help.width"));
}
