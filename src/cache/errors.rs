use thiserror::Error;

/// 缓存操作错误
#[derive(Debug, Error)]
pub enum CacheError {
    /// 无法连接缓存服务
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// 缓存命令执行失败
    #[error("Cache backend error: {0}")]
    Backend(String),

    /// 缓存内容无法解析
    #[error("Cache decode error: {0}")]
    Decode(String),

    /// 响应无法序列化为缓存内容
    #[error("Cache encode error: {0}")]
    Encode(String),
}

pub type CacheResult<T> = Result<T, CacheError>;
