use std::env;
use std::path::PathBuf;

use crate::Result;

/// アクセスキー ID の環境変数（先頭が優先）
pub const ACCESS_KEY_ID_VARS: &[&str] = &["S3_ACCESS_KEY_ID", "AWS_ACCESS_KEY_ID"];
/// シークレットアクセスキーの環境変数
pub const SECRET_ACCESS_KEY_VARS: &[&str] = &["S3_SECRET_ACCESS_KEY", "AWS_SECRET_ACCESS_KEY"];
/// 一時認証情報（STS）のセッショントークンの環境変数
pub const SESSION_TOKEN_VARS: &[&str] = &["S3_SESSION_TOKEN", "AWS_SESSION_TOKEN"];
/// リージョンの環境変数
pub const REGION_VARS: &[&str] = &["S3_REGION", "AWS_REGION"];
/// エンドポイントの環境変数
pub const ENDPOINT_VARS: &[&str] = &["S3_ENDPOINT", "AWS_ENDPOINT"];

/// コマンドラインから受け取った未検証の引数
#[derive(Debug, Clone, Default)]
pub struct UploadArgs {
    pub bucket: Option<String>,
    pub file: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// アップロード元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// 単一ファイル
    File(PathBuf),
    /// ディレクトリ（再帰）
    Dir(PathBuf),
}

/// 検証済みのアップロード設定
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// 環境変数からのみ取得（フラグはない）
    pub session_token: Option<String>,
    pub source: UploadSource,
}

impl UploadConfig {
    /// プロセスの環境変数を参照して設定を解決
    pub fn resolve(args: UploadArgs) -> Result<Self> {
        Self::resolve_with(args, |name| env::var(name).ok())
    }

    /// 引数を検証し、未指定の項目を `lookup` で補完する
    ///
    /// 検証順序: バケット名 → `--file` / `--dir`。
    /// 両方指定された場合は `--file` が優先され、`--dir` は無視される。
    pub fn resolve_with<F>(args: UploadArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket = non_empty(args.bucket).ok_or(crate::Error::MissingBucket)?;

        let source = match (args.file, args.dir) {
            (Some(file), _) => UploadSource::File(file),
            (None, Some(dir)) => UploadSource::Dir(dir),
            (None, None) => return Err(crate::Error::MissingSource),
        };

        // フラグを優先し、なければ環境変数
        let pick = |flag: Option<String>, vars: &[&str]| {
            non_empty(flag).or_else(|| vars.iter().find_map(|name| non_empty(lookup(*name))))
        };

        Ok(Self {
            bucket,
            region: pick(args.region, REGION_VARS),
            endpoint: pick(args.endpoint, ENDPOINT_VARS),
            access_key_id: pick(args.access_key_id, ACCESS_KEY_ID_VARS),
            secret_access_key: pick(args.secret_access_key, SECRET_ACCESS_KEY_VARS),
            session_token: pick(None, SESSION_TOKEN_VARS),
            source,
        })
    }

    /// キー ID とシークレットが両方揃っている場合のみ静的認証情報を返す
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
