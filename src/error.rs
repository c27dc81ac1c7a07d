use async_openai::error::OpenAIError;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 生成服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 响应解析错误（只在题型管线内部出现）
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 出题结果错误
    #[error("出题错误: {0}")]
    Quiz(#[from] QuizError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 题目总数非零但没有启用任何题型
    #[error("请求 {total} 道题目，但没有启用任何题型")]
    NoQuestionTypes { total: usize },
    /// 未配置 API 密钥且未启用模拟生成
    #[error("未配置 LLM_API_KEY，且未启用 USE_MOCK_LLM")]
    MissingApiKey,
}

/// 生成服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {0}")]
    RequestBuildFailed(#[source] OpenAIError),
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: OpenAIError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 调用超时
    #[error("LLM调用超时 ({seconds} 秒)")]
    Timeout { seconds: u64 },
    /// 调用被取消
    #[error("LLM调用已取消")]
    Cancelled,
    /// 服务拒绝请求（配额、内容策略等）
    #[error("LLM拒绝请求: {0}")]
    Rejected(String),
}

/// 响应解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// 响应中找不到 JSON 数组
    #[error("响应中没有找到 JSON 数组")]
    NoArrayFound,
    /// JSON 解码失败
    #[error("JSON解析失败: {0}")]
    DecodeFailed(#[from] serde_json::Error),
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    SerializeFailed(#[from] serde_json::Error),
}

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 读取失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 内容损坏
    #[error("存储内容无法解析 ({path}): {source}")]
    Corrupted {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 出题结果错误
#[derive(Debug, Error)]
pub enum QuizError {
    /// 所有题型都没有产出题目
    #[error("出题失败: {document} 没有生成任何题目")]
    NothingGenerated { document: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(model: impl Into<String>, source: OpenAIError) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source,
        })
    }

    /// 创建导出写入错误
    pub fn export_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Export(ExportError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为调用方取消
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Llm(LlmError::Cancelled))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
