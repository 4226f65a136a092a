/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// Supabase 项目 URL
    pub supabase_url: String,
    /// Supabase API Key
    pub supabase_key: String,
    /// 导出文档路径
    pub export_path: String,
    /// 草稿文件存放目录
    pub draft_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_key: String::new(),
            export_path: "survey.md".to_string(),
            draft_folder: "drafts".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            supabase_url: std::env::var("SUPABASE_URL").unwrap_or(default.supabase_url),
            supabase_key: std::env::var("SUPABASE_KEY").unwrap_or(default.supabase_key),
            export_path: std::env::var("EXPORT_PATH").unwrap_or(default.export_path),
            draft_folder: std::env::var("DRAFT_FOLDER").unwrap_or(default.draft_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
        }
    }
}
