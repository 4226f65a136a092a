//! 错误类型定义
//!
//! 按错误来源分类：数据服务调用、会话编辑、导出、文件操作

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据服务调用错误
    #[error("数据服务错误: {0}")]
    Api(#[from] ApiError),
    /// 会话编辑错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 数据服务（Supabase REST 接口）调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非成功状态码
    #[error("API返回错误状态 ({endpoint}): HTTP {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 响应 JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 会话编辑错误
///
/// 编辑操作在单线程事件循环中同步执行，每次结构性修改后
/// 调用方都会重新读取会话状态，因此索引越界只可能来自调用方传参错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 题目索引越界
    #[error("题目索引 {index} 超出范围，当前共 {len} 道题目")]
    QuestionIndexOutOfRange { index: usize, len: usize },
    /// 选项索引越界
    #[error("选项索引 {index} 超出范围，当前共 {len} 个选项")]
    OptionIndexOutOfRange { index: usize, len: usize },
    /// 题库题目不允许修改类型
    #[error("题库题目不允许修改类型: {id}")]
    KindChangeOnCatalogQuestion { id: String },
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 题库题目 ID 无法按「类型_数字」拆分
    #[error("无法解析题目ID: {id}")]
    MalformedQuestionId { id: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = std::result::Result<T, AppError>;
