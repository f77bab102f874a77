use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::UploadSource;
use crate::{Result, StorageClient};

/// アップロード対象の 1 ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// ローカルパス
    pub local_path: PathBuf,
    /// バケット内のキー
    pub remote_key: String,
}

/// アップロード結果
#[derive(Debug, Clone)]
pub struct UploadSummary {
    pub bucket: String,
    /// 書き込んだキー（アップロード順）
    pub keys: Vec<String>,
}

impl UploadSummary {
    pub fn count(&self) -> usize {
        self.keys.len()
    }
}

/// 単一ファイルのアップロード対象を作成（キーはファイル名のみ）
pub fn plan_file(path: &Path) -> Result<UploadItem> {
    let name = path
        .file_name()
        .ok_or_else(|| crate::Error::InvalidPath(path.display().to_string()))?;

    Ok(UploadItem {
        local_path: path.to_path_buf(),
        remote_key: name.to_string_lossy().to_string(),
    })
}

/// ディレクトリ以下の通常ファイルを再帰的に列挙
///
/// キーは走査で得たパスそのもの（`{親ディレクトリ}/{ファイル名}`）なので、
/// 指定したディレクトリ名がプレフィックスとして含まれる。
pub fn plan_directory(dir: &Path) -> Result<Vec<UploadItem>> {
    let mut items = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let remote_key = match entry.path().parent().map(normalize_separators) {
            Some(parent) if !parent.is_empty() => format!("{}/{}", parent, name),
            _ => name.to_string(),
        };

        debug!(path = %entry.path().display(), key = %remote_key, "planned");

        items.push(UploadItem {
            local_path: entry.path().to_path_buf(),
            remote_key,
        });
    }

    Ok(items)
}

/// アップロード元から対象ファイルを決定
pub fn plan(source: &UploadSource) -> Result<Vec<UploadItem>> {
    match source {
        UploadSource::File(path) => Ok(vec![plan_file(path)?]),
        UploadSource::Dir(dir) => plan_directory(dir),
    }
}

/// 1 件ずつ順番にアップロード
///
/// 失敗した時点で中断し、それ以降のファイルは送信しない。
/// 成功ごとに `on_uploaded` が呼ばれる。
pub async fn upload_items<C, F>(
    client: &C,
    items: &[UploadItem],
    mut on_uploaded: F,
) -> Result<UploadSummary>
where
    C: StorageClient + ?Sized,
    F: FnMut(&UploadItem),
{
    let mut keys = Vec::with_capacity(items.len());

    for item in items {
        debug!(key = %item.remote_key, "uploading");
        client.write(&item.remote_key, &item.local_path).await?;
        on_uploaded(item);
        keys.push(item.remote_key.clone());
    }

    info!(bucket = client.bucket(), count = keys.len(), "upload finished");

    Ok(UploadSummary {
        bucket: client.bucket().to_string(),
        keys,
    })
}

/// 対象を決定してからアップロードを実行
pub async fn run<C, F>(client: &C, source: &UploadSource, on_uploaded: F) -> Result<UploadSummary>
where
    C: StorageClient + ?Sized,
    F: FnMut(&UploadItem),
{
    let items = plan(source)?;
    upload_items(client, &items, on_uploaded).await
}

fn normalize_separators(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.to_string()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
