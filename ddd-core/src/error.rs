//! 领域内核统一错误定义
//!
//! 覆盖标识构造、身份保护、投影（plain 化）、Result 辅助与常量表等最小必要集合，
//! 调用方通过 `?` 统一传播为 `DomainError`。
//!
use thiserror::Error;

/// 统一错误类型（内核最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 标识/身份 ---
    #[error("invalid identifier: {reason}")]
    InvalidIdentifier { reason: String },
    #[error("identity is protected: property `{key}` can only be read through `id()` and never set")]
    IdentityProtected { key: String },

    // --- 投影 ---
    #[error("projection error: {reason}")]
    Projection { reason: String },
    #[error("projection exceeded max depth {max_depth}; the object graph is too deep or cyclic")]
    DepthExceeded { max_depth: usize },
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    // --- Result 辅助 ---
    #[error("{message}")]
    Expectation { message: String },
    #[error("panicked: {message}")]
    Panicked { message: String },

    // --- 常量表 ---
    #[error("duplicate constant key: {key}")]
    DuplicateConstant { key: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub(crate) fn identity_protected(key: impl Into<String>) -> Self {
        DomainError::IdentityProtected { key: key.into() }
    }

    pub(crate) fn projection(reason: impl Into<String>) -> Self {
        DomainError::Projection {
            reason: reason.into(),
        }
    }
}
