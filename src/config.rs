use crate::error::ConfigError;
use crate::models::{Difficulty, QuizOptions};

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 待出题文档所在目录
    pub input_folder: String,
    /// 导出文件目录
    pub output_folder: String,
    /// 出题选项 TOML 文件（不存在时使用环境变量选项）
    pub options_file: String,
    /// 最近一次测验的存储文件
    pub last_quiz_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 单次生成调用的超时时间（秒）
    pub generation_timeout_secs: u64,
    // --- 出题选项 ---
    pub quiz_options: QuizOptions,
    // --- LLM 配置 ---
    pub use_mock_llm: bool,
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 4,
            input_folder: "input_text".to_string(),
            output_folder: "output_quiz".to_string(),
            options_file: "quiz.toml".to_string(),
            last_quiz_file: "last_quiz.json".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            generation_timeout_secs: 120,
            quiz_options: QuizOptions::default(),
            use_mock_llm: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        let default_options = default.quiz_options.clone();
        let llm_api_key = std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key);

        Self {
            max_concurrent_documents: env_parse("MAX_CONCURRENT_DOCUMENTS")
                .unwrap_or(default.max_concurrent_documents)
                .max(1),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            options_file: std::env::var("QUIZ_OPTIONS_FILE").unwrap_or(default.options_file),
            last_quiz_file: std::env::var("LAST_QUIZ_FILE").unwrap_or(default.last_quiz_file),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            generation_timeout_secs: env_parse("GENERATION_TIMEOUT_SECS")
                .unwrap_or(default.generation_timeout_secs),
            quiz_options: QuizOptions {
                mcq: env_parse("ENABLE_MCQ").unwrap_or(default_options.mcq),
                true_false: env_parse("ENABLE_TRUE_FALSE").unwrap_or(default_options.true_false),
                short_answer: env_parse("ENABLE_SHORT_ANSWER")
                    .unwrap_or(default_options.short_answer),
                difficulty: std::env::var("DIFFICULTY")
                    .map(Difficulty::from)
                    .unwrap_or(default_options.difficulty),
                num_questions: env_parse("NUM_QUESTIONS").unwrap_or(default_options.num_questions),
            },
            // 没有密钥时默认走模拟生成
            use_mock_llm: env_parse("USE_MOCK_LLM").unwrap_or(llm_api_key.is_empty()),
            llm_api_key,
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.use_mock_llm && self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        self.quiz_options.validate()
    }
}
