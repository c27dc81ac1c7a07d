use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 可作为出题素材的文件扩展名
const DOCUMENT_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// 待出题的文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
    /// 文件名（不含扩展名），用作导出文件名
    pub name: String,
    pub path: PathBuf,
}

impl InputDocument {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "quiz".to_string());
        Self {
            name,
            path: path.to_path_buf(),
        }
    }
}

/// 列出文件夹中的所有文档（按文件名排序）
pub async fn list_documents(folder_path: &str) -> Result<Vec<InputDocument>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut documents = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_document = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext));
        if is_document {
            tracing::debug!(
                "发现文档: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );
            documents.push(InputDocument::from_path(&path));
        }
    }

    documents.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(documents)
}
