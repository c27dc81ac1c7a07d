//! 文本提取
//!
//! 出题素材的来源。读取失败时返回空字符串，由规范化阶段当作"没有内容"处理

use std::path::{Path, PathBuf};
use tracing::warn;

/// 页面文本来源
pub trait PageSource: Send + Sync {
    fn extract_page_text(&self) -> String;
}

/// 从文件读取（非 UTF-8 字节按替换字符处理）
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PageSource for FilePageSource {
    fn extract_page_text(&self) -> String {
        match std::fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("读取文档失败 {}: {}", self.path.display(), e);
                String::new()
            }
        }
    }
}

/// 固定文本
pub struct StaticPageSource(pub String);

impl PageSource for StaticPageSource {
    fn extract_page_text(&self) -> String {
        self.0.clone()
    }
}
