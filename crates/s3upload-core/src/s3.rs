use std::path::Path;

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::content_type::content_type_for;
use crate::{Result, StorageClient};

/// リージョンがどこからも取得できない場合の既定値
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS SDK の S3 クライアントのラッパー
pub struct S3Client {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Client {
    /// 設定から S3 クライアントを作成
    ///
    /// 未指定の認証情報・リージョンは SDK のデフォルトチェーンに任せる。
    /// カスタムエンドポイントを指定した場合はパススタイルでアクセスする。
    pub async fn new(config: &UploadConfig) -> Self {
        let region = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if let Some(credentials) = static_credentials(config) {
            loader = loader.credentials_provider(credentials);
        }

        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        info!(
            bucket = %config.bucket,
            endpoint = config.endpoint.as_deref().unwrap_or("default"),
            "S3 client created"
        );

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    #[cfg(test)]
    fn sdk_config(&self) -> &aws_sdk_s3::Config {
        self.client.config()
    }
}

/// キー ID とシークレットが揃っていれば静的認証情報を作る（セッショントークン付き）
fn static_credentials(config: &UploadConfig) -> Option<Credentials> {
    let (key_id, secret) = config.static_credentials()?;
    Some(Credentials::new(
        key_id,
        secret,
        config.session_token.clone(),
        None,
        "s3upload",
    ))
}

#[async_trait]
impl StorageClient for S3Client {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn write(&self, key: &str, local_path: &Path) -> Result<()> {
        let upload_error = |message: String| crate::Error::Upload {
            key: key.to_string(),
            message,
        };

        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| upload_error(format!("Failed to read {}: {}", local_path.display(), e)))?;

        let content_type = content_type_for(local_path);
        debug!(key, content_type = %content_type, "put_object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type.to_string())
            .send()
            .await
            .map_err(|e| upload_error(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}
