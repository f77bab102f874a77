use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to walk directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Please provide a bucket name as argument")]
    MissingBucket,

    #[error("Either --file or --dir must be specified")]
    MissingSource,

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to upload {key}: {message}")]
    Upload { key: String, message: String },
}

impl Error {
    /// 使い方の誤りによるエラーか（ヘルプ表示 + exit 1 の対象）
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::MissingBucket | Error::MissingSource)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
