//! 测验存储
//!
//! 只保存"最近一次测验"，供导出和展示使用，出题管线本身不依赖它

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{AppResult, StoreError};
use crate::models::Question;

#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn save_last_quiz(&self, questions: &[Question]) -> AppResult<()>;
    async fn load_last_quiz(&self) -> AppResult<Option<Vec<Question>>>;
}

/// JSON 文件存储
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl QuizStore for JsonFileStore {
    async fn save_last_quiz(&self, questions: &[Question]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(questions).map_err(|e| StoreError::Corrupted {
            path: self.path_string(),
            source: e,
        })?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::WriteFailed {
                path: self.path_string(),
                source: e,
            })?;

        debug!("已保存最近一次测验: {} 道题目", questions.len());
        Ok(())
    }

    async fn load_last_quiz(&self) -> AppResult<Option<Vec<Question>>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: self.path_string(),
                    source: e,
                }
                .into())
            }
        };

        let questions = serde_json::from_str(&content).map_err(|e| StoreError::Corrupted {
            path: self.path_string(),
            source: e,
        })?;

        Ok(Some(questions))
    }
}

/// 内存存储
#[derive(Default)]
pub struct MemoryStore {
    last_quiz: Mutex<Option<Vec<Question>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn save_last_quiz(&self, questions: &[Question]) -> AppResult<()> {
        *self.last_quiz.lock().await = Some(questions.to_vec());
        Ok(())
    }

    async fn load_last_quiz(&self) -> AppResult<Option<Vec<Question>>> {
        Ok(self.last_quiz.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Difficulty, QuestionType};

    fn sample() -> Vec<Question> {
        vec![Question {
            text: "Water is wet.".to_string(),
            options: Vec::new(),
            answer: "True".to_string(),
            question_type: QuestionType::TrueFalse,
            difficulty: Difficulty::Easy,
        }]
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("last_quiz.json"));

        assert!(store.load_last_quiz().await.unwrap().is_none());
        store.save_last_quiz(&sample()).await.unwrap();
        assert_eq!(store.load_last_quiz().await.unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn test_file_store_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_quiz.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::new(&path)
            .load_last_quiz()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::Corrupted { .. })));
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        store.save_last_quiz(&sample()).await.unwrap();
        store.save_last_quiz(&[]).await.unwrap();
        assert_eq!(store.load_last_quiz().await.unwrap(), Some(Vec::new()));
    }
}
