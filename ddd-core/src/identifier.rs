//! 唯一标识（Identifier）
//!
//! 不可变、可比较的实体/聚合标识：
//! - 由调用方提供时视为已存在的身份（`is_new() == false`）；
//! - 省略时通过 `IdGenerator` 生成新的身份（`is_new() == true`），默认为 UUID v4。
//!
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// 标识生成器：生成全局唯一的字符串
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// 默认生成器：随机 UUID v4（36 个字符的规范形式）
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String,
{
    fn generate(&self) -> String {
        self()
    }
}

/// 实体/聚合的唯一标识
///
/// 相等性只比较字符串值，`is_new` 不参与比较与哈希。
///
/// # 示例
///
/// ```
/// use ddd_core::identifier::Identifier;
///
/// let existing = Identifier::create(Some("user-1")).unwrap();
/// assert_eq!(existing.value(), "user-1");
/// assert!(!existing.is_new());
///
/// let fresh = Identifier::create(None).unwrap();
/// assert_eq!(fresh.value().len(), 36);
/// assert!(fresh.is_new());
/// ```
#[derive(Debug, Clone)]
pub struct Identifier {
    value: String,
    is_new: bool,
}

impl Identifier {
    /// 创建标识：非空字符串视为已存在的身份，`None` 或空串则生成新身份
    pub fn create(raw: Option<&str>) -> DomainResult<Self> {
        match raw {
            Some(value) if !value.is_empty() => Ok(Self::existing(value)),
            _ => Ok(Self::generate()),
        }
    }

    /// 使用默认生成器生成新身份
    pub fn generate() -> Self {
        Self::generate_with(&UuidV4Generator)
    }

    /// 使用注入的生成器生成新身份
    pub fn generate_with<G>(generator: &G) -> Self
    where
        G: IdGenerator + ?Sized,
    {
        let value = generator.generate();
        tracing::trace!(id = %value, "generated identifier");
        Self {
            value,
            is_new: true,
        }
    }

    /// 包装一个已存在的身份
    ///
    /// 不做任何校验，空串也会被原样接受；需要校验时使用 `create` 或 `FromStr`。
    pub fn existing(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_new: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// 是否为新生成（尚未持久化）的身份
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn equals(&self, other: &Identifier) -> bool {
        self.value == other.value
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::create(Some(s))
    }
}

// 空串与 `create` 一致：生成新身份
impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::generate()
        } else {
            Self::existing(value)
        }
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::generate()
        } else {
            Self::existing(value)
        }
    }
}

impl From<Uuid> for Identifier {
    fn from(value: Uuid) -> Self {
        Self::existing(value.to_string())
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.value
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

// 反序列化得到的总是已存在的身份，空串无从还原
impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() {
            return Err(serde::de::Error::custom(DomainError::InvalidIdentifier {
                reason: "identifier must not be empty".into(),
            }));
        }
        Ok(Self::existing(value))
    }
}
