pub mod config;
pub mod content_type;
pub mod error;
pub mod s3;
pub mod storage;
pub mod upload;

pub use config::{UploadArgs, UploadConfig, UploadSource};
pub use error::{Error, Result};
pub use s3::S3Client;
pub use storage::StorageClient;
pub use upload::{UploadItem, UploadSummary};
