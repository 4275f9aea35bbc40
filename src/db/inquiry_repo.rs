use std::path::PathBuf;
use std::sync::Arc;

use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

use crate::{common::error::AppError, models::inquiry::Inquiry};

/// Append-only JSON-lines log of submitted inquiries.
#[derive(Clone)]
pub struct InquiryRepository {
    path: PathBuf,
    // Serializes appends so concurrent submissions never interleave lines.
    write_lock: Arc<Mutex<()>>,
}

impl InquiryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn append(&self, inquiry: &Inquiry) -> Result<(), AppError> {
        let mut line = serde_json::to_string(inquiry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
