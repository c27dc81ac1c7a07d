//! 导出服务 - 业务能力层
//!
//! 把规范题目列表序列化为 JSON、纯文本、Moodle XML，并写入导出目录

pub mod json;
pub mod moodle;
pub mod text;

pub use json::JsonExporter;
pub use moodle::{escape_xml, MoodleXmlExporter};
pub use text::TextExporter;

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::Question;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    PlainText,
    MoodleXml,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [
        ExportFormat::Json,
        ExportFormat::PlainText,
        ExportFormat::MoodleXml,
    ];

    /// 导出文件名（沿用浏览器插件的 quiz.json / quiz_moodle.xml 命名）
    pub fn file_name(self, base_name: &str) -> String {
        match self {
            ExportFormat::Json => format!("{}.json", base_name),
            ExportFormat::PlainText => format!("{}.txt", base_name),
            ExportFormat::MoodleXml => format!("{}_moodle.xml", base_name),
        }
    }

    pub fn render(self, questions: &[Question]) -> AppResult<String> {
        Ok(match self {
            ExportFormat::Json => JsonExporter::to_json(questions)?,
            ExportFormat::PlainText => TextExporter::to_plain_text(questions),
            ExportFormat::MoodleXml => MoodleXmlExporter::to_moodle_xml(questions),
        })
    }
}

/// 按所有格式导出到目录，返回写入的文件路径
///
/// 写入失败以 `ExportError` 返回，不影响内存中的题目列表
pub async fn export_all(
    questions: &[Question],
    output_dir: &Path,
    base_name: &str,
) -> AppResult<Vec<PathBuf>> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| AppError::export_write_failed(output_dir.display().to_string(), e))?;

    let mut written = Vec::with_capacity(ExportFormat::ALL.len());
    for format in ExportFormat::ALL {
        let path = output_dir.join(format.file_name(base_name));
        let content = format.render(questions)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AppError::export_write_failed(path.display().to_string(), e))?;
        debug!("已导出: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
