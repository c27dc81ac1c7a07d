use crate::models::options::QuizOptions;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载出题选项
pub async fn load_quiz_options(toml_file_path: &Path) -> Result<QuizOptions> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取选项文件: {}", toml_file_path.display()))?;

    let options: QuizOptions = toml::from_str(&content)
        .with_context(|| format!("无法解析选项文件: {}", toml_file_path.display()))?;

    Ok(options)
}

/// 选项文件存在时加载，否则使用给定的后备选项
pub async fn load_quiz_options_or(
    toml_file_path: &Path,
    fallback: QuizOptions,
) -> Result<QuizOptions> {
    if !toml_file_path.exists() {
        tracing::info!(
            "选项文件不存在，使用环境变量选项: {}",
            toml_file_path.display()
        );
        return Ok(fallback);
    }

    let options = load_quiz_options(toml_file_path).await?;
    tracing::info!("已加载选项文件: {}", toml_file_path.display());
    Ok(options)
}
