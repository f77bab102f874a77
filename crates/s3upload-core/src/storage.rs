use std::path::Path;

use async_trait::async_trait;

use crate::Result;

/// オブジェクトストレージへの書き込みインターフェース
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// 書き込み先のバケット名
    fn bucket(&self) -> &str;

    /// ローカルファイルの内容を `key` に書き込む
    async fn write(&self, key: &str, local_path: &Path) -> Result<()>;
}
