use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// 認証情報などを環境から拾わないようにしたコマンド
fn s3upload() -> Command {
    let mut cmd = Command::cargo_bin("s3upload").expect("Binary exists");
    for var in [
        "S3_ACCESS_KEY_ID",
        "AWS_ACCESS_KEY_ID",
        "S3_SECRET_ACCESS_KEY",
        "AWS_SECRET_ACCESS_KEY",
        "S3_REGION",
        "AWS_REGION",
        "S3_ENDPOINT",
        "AWS_ENDPOINT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// ネットワークに出ないローカル設定
fn offline_flags(cmd: &mut Command) -> &mut Command {
    cmd.args([
        "--region",
        "us-east-1",
        "--endpoint",
        "http://127.0.0.1:9",
        "--access-key-id",
        "test-id",
        "--secret-access-key",
        "test-secret",
    ])
}

#[test]
fn missing_bucket_exits_with_usage() {
    s3upload()
        .arg("--file")
        .arg("index.html")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please provide a bucket name as argument"))
        .stderr(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("Uploaded").not());
}

#[test]
fn missing_file_and_dir_exits_with_message() {
    s3upload()
        .arg("my-bucket")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Either --file or --dir must be specified"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn help_lists_all_flags() {
    s3upload()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--file")
                .and(predicate::str::contains("--dir"))
                .and(predicate::str::contains("--region"))
                .and(predicate::str::contains("--endpoint"))
                .and(predicate::str::contains("--access-key-id"))
                .and(predicate::str::contains("--secret-access-key")),
        );
}

#[test]
fn short_version_flag_prints_version() {
    s3upload()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unreadable_file_fails_with_upload_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.html");

    let mut cmd = s3upload();
    offline_flags(&mut cmd)
        .arg("my-bucket")
        .arg("--file")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to upload missing.html"))
        .stdout(predicate::str::contains("Uploaded").not());
}

#[test]
fn missing_directory_fails_before_uploading() {
    let temp = TempDir::new().unwrap();

    let mut cmd = s3upload();
    offline_flags(&mut cmd)
        .arg("my-bucket")
        .arg("--dir")
        .arg(temp.path().join("build"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to walk directory"))
        .stdout(predicate::str::is_empty());
}
