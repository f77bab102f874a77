use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;
use s3upload_core::{Error, S3Client, UploadArgs, UploadConfig, UploadSource};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "s3upload")]
#[command(
    author,
    version,
    about = "S3 互換ストレージへのファイル/ディレクトリアップロードツール",
    long_about = None,
    disable_version_flag = true,
    after_help = "Examples:\n  \
        $ s3upload my-bucket --file index.html\n  \
        $ s3upload react-site --dir build --endpoint $S3_URL --region $AWS_REGION"
)]
struct Cli {
    /// アップロード先のバケット名
    bucket: Option<String>,

    /// アップロードする単一ファイル
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 再帰的にアップロードするディレクトリ
    #[arg(long)]
    dir: Option<PathBuf>,

    /// AWS リージョン
    #[arg(long)]
    region: Option<String>,

    /// S3 エンドポイント URL
    #[arg(long)]
    endpoint: Option<String>,

    /// AWS アクセスキー ID
    #[arg(long)]
    access_key_id: Option<String>,

    /// AWS シークレットアクセスキー
    #[arg(long)]
    secret_access_key: Option<String>,

    /// バージョンを表示
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    fn into_args(self) -> UploadArgs {
        UploadArgs {
            bucket: self.bucket,
            file: self.file,
            dir: self.dir,
            region: self.region,
            endpoint: self.endpoint,
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = match UploadConfig::resolve(cli.into_args()) {
        Ok(config) => config,
        Err(e) if e.is_usage() => usage_error(&e),
        Err(e) => return Err(e.into()),
    };

    upload(&config).await
}

/// ログは stderr に出し、stdout はアップロード結果だけにする
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "s3upload=warn,s3upload_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// 使い方のエラーを表示して終了（exit 1）
fn usage_error(err: &Error) -> ! {
    eprintln!("{} {}", "✗".red().bold(), err.to_string().red());

    // バケット名がない場合はヘルプも表示
    if matches!(err, Error::MissingBucket) {
        eprintln!("\n{}", Cli::command().render_help());
    }

    std::process::exit(1);
}

async fn upload(config: &UploadConfig) -> Result<()> {
    tracing::info!(bucket = %config.bucket, source = ?config.source, "starting upload");

    let client = S3Client::new(config).await;

    let summary = s3upload_core::upload::run(&client, &config.source, |item| {
        println!("{}", uploaded_line(&item.remote_key, &config.bucket));
    })
    .await?;

    if let UploadSource::Dir(_) = config.source {
        println!("{}", summary_line(summary.count(), &summary.bucket));
    }

    Ok(())
}

/// 1 ファイルごとの完了行
fn uploaded_line(key: &str, bucket: &str) -> String {
    format!("{} Uploaded {} to {}", "✓".green(), key, bucket)
}

/// ディレクトリアップロードの最後に出す件数行
fn summary_line(count: usize, bucket: &str) -> String {
    format!(
        "Uploaded {} files to {}",
        count.to_string().green().bold(),
        bucket
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "s3upload",
            "react-site",
            "-f",
            "build/index.html",
            "--dir",
            "build",
            "--access-key-id",
            "id",
            "--secret-access-key",
            "secret",
        ])
        .unwrap();

        let args = cli.into_args();
        assert_eq!(args.bucket.as_deref(), Some("react-site"));
        assert_eq!(args.file, Some(PathBuf::from("build/index.html")));
        assert_eq!(args.dir, Some(PathBuf::from("build")));
        assert_eq!(args.access_key_id.as_deref(), Some("id"));
        assert_eq!(args.secret_access_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_bucket_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["s3upload", "--dir", "build"]).unwrap();
        assert!(cli.bucket.is_none());
    }

    #[test]
    fn test_output_lines() {
        colored::control::set_override(false);

        assert_eq!(
            uploaded_line("build/index.html", "react-site"),
            "✓ Uploaded build/index.html to react-site"
        );
        assert_eq!(
            summary_line(3, "react-site"),
            "Uploaded 3 files to react-site"
        );
    }

    #[test]
    fn test_short_version_flag() {
        let err = Cli::try_parse_from(["s3upload", "-v"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
