//! 投影结果（Plain）
//!
//! 与 JSON 同构的纯值结构，区别在于日期保持为日期类型（`Plain::Date`），
//! 只在序列化时才转为 RFC 3339 字符串。对象键保持插入顺序。
//!
use std::ops::Index;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};

use crate::error::DomainResult;

/// 保序的对象映射
pub type PlainMap = IndexMap<String, Plain>;

/// 领域对象图投影后的纯值
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Plain {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Plain>),
    Object(PlainMap),
}

impl Plain {
    pub fn is_null(&self) -> bool {
        matches!(self, Plain::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Plain::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Plain::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Plain::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Plain::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Plain::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Plain]> {
        match self {
            Plain::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PlainMap> {
        match self {
            Plain::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<PlainMap> {
        match self {
            Plain::Object(map) => Some(map),
            _ => None,
        }
    }

    /// 值的类别名，用于错误信息
    pub fn kind(&self) -> &'static str {
        match self {
            Plain::Null => "null",
            Plain::Bool(_) => "bool",
            Plain::Number(_) => "number",
            Plain::String(_) => "string",
            Plain::Date(_) => "date",
            Plain::Array(_) => "array",
            Plain::Object(_) => "object",
        }
    }

    /// 按键读取对象字段，非对象时为 `None`
    pub fn get(&self, key: &str) -> Option<&Plain> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// 浮点数无法表示为 JSON 数字（NaN/∞）时投影为 `Null`
    pub fn from_f64(value: f64) -> Self {
        Number::from_f64(value).map_or(Plain::Null, Plain::Number)
    }

    /// 转为 `serde_json::Value`，日期转为 RFC 3339 字符串
    pub fn to_json(&self) -> Value {
        match self {
            Plain::Null => Value::Null,
            Plain::Bool(b) => Value::Bool(*b),
            Plain::Number(n) => Value::Number(n.clone()),
            Plain::String(s) => Value::String(s.clone()),
            Plain::Date(d) => Value::String(format_date(d)),
            Plain::Array(items) => Value::Array(items.iter().map(Plain::to_json).collect()),
            Plain::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// 序列化为 JSON 字符串
    pub fn to_json_string(&self) -> DomainResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Serialize for Plain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Plain::Null => serializer.serialize_unit(),
            Plain::Bool(b) => serializer.serialize_bool(*b),
            Plain::Number(n) => n.serialize(serializer),
            Plain::String(s) => serializer.serialize_str(s),
            Plain::Date(d) => serializer.serialize_str(&format_date(d)),
            Plain::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Plain::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

static NULL: Plain = Plain::Null;

/// 按键索引对象字段；缺失或非对象时为 `Plain::Null`
impl Index<&str> for Plain {
    type Output = Plain;

    fn index(&self, key: &str) -> &Plain {
        self.get(key).unwrap_or(&NULL)
    }
}

impl From<Plain> for Value {
    fn from(plain: Plain) -> Self {
        plain.to_json()
    }
}

impl From<Value> for Plain {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Plain::Null,
            Value::Bool(b) => Plain::Bool(b),
            Value::Number(n) => Plain::Number(n),
            Value::String(s) => Plain::String(s),
            Value::Array(items) => Plain::Array(items.into_iter().map(Plain::from).collect()),
            Value::Object(map) => {
                Plain::Object(map.into_iter().map(|(k, v)| (k, Plain::from(v))).collect())
            }
        }
    }
}

impl From<PlainMap> for Plain {
    fn from(map: PlainMap) -> Self {
        Plain::Object(map)
    }
}
