//! 冻结常量表（Constant）
//!
//! 由 `(名称, 值)` 构造的只读命名值集合，保持声明顺序，
//! 不提供任何修改 API。名称重复在构造时拒绝。
//!
use std::collections::HashMap;
use std::ops::Index;

use crate::error::{DomainError, DomainResult};
use crate::plain::{Plain, PlainMap};
use crate::projection::{Projector, ToPlain};

/// 只读常量表
///
/// ```
/// use ddd_core::constants;
///
/// let status = constants! {
///     ACTIVE => "active",
///     BLOCKED => "blocked",
/// }
/// .unwrap();
///
/// assert_eq!(status["ACTIVE"], "active");
/// assert_eq!(status.keys(), &["ACTIVE", "BLOCKED"]);
/// assert_eq!(status.values(), &["active", "blocked"]);
/// ```
#[derive(Debug, Clone)]
pub struct Constant<V> {
    index: HashMap<&'static str, usize>,
    keys: Vec<&'static str>,
    values: Vec<V>,
}

impl<V> Constant<V> {
    /// 按声明顺序构造；名称重复时返回 `DuplicateConstant`
    pub fn try_new<I>(entries: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (&'static str, V)>,
    {
        let mut index = HashMap::new();
        let mut keys = Vec::new();
        let mut values = Vec::new();

        for (key, value) in entries {
            if index.insert(key, keys.len()).is_some() {
                return Err(DomainError::DuplicateConstant {
                    key: key.to_string(),
                });
            }
            keys.push(key);
            values.push(value);
        }

        Ok(Self {
            index,
            keys,
            values,
        })
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.values[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &V)> {
        self.keys.iter().copied().zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<V> Index<&str> for Constant<V> {
    type Output = V;

    /// 名称不存在时 panic，与 `HashMap` 的索引一致
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("unknown constant: {key}"),
        }
    }
}

impl<V: ToPlain> ToPlain for Constant<V> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        let mut map = PlainMap::with_capacity(self.len());
        for (key, value) in self.iter() {
            map.insert(key.to_string(), projector.project(value)?);
        }
        Ok(Plain::Object(map))
    }
}

/// 以 `名称 => 值` 的形式声明常量表
#[macro_export]
macro_rules! constants {
    ($($key:ident => $value:expr),* $(,)?) => {
        $crate::constant::Constant::try_new([
            $((stringify!($key), $value)),*
        ])
    };
}
