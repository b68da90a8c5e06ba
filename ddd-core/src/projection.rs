//! 投影引擎（plain 化）
//!
//! 将由实体、值对象、标识、日期、集合与映射组成的对象图递归转换为 `Plain`：
//! 1. `Identifier` → 字符串；
//! 2. 日期时间 → `Plain::Date`（保持日期类型）；
//! 3. 集合（Set）→ 数组，按迭代顺序；
//! 4. 映射（Map）→ 对象，键通过 `Display` 转为字符串；
//! 5. 领域对象 → 其自身的 `to_object` 投影；
//! 6. 序列 → 逐元素投影，保持顺序；
//! 7. 属性结构体（`#[derive(Props)]`）→ 对象，保持字段声明顺序；
//! 8. 其余原样（数字、布尔、字符串、空值）。
//!
//! 所有递归都经过 `Projector::project`，由它统计嵌套深度并在超过
//! `ProjectionConfig::max_depth` 时以 `DomainError::DepthExceeded` 拒绝，
//! 避免自引用对象图导致栈溢出。
//!
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use bon::Builder;
use chrono::{DateTime, TimeZone, Utc};
use indexmap::{IndexMap, IndexSet};
use uuid::Uuid;

use crate::adapter::Adapter;
use crate::error::{DomainError, DomainResult};
use crate::identifier::Identifier;
use crate::plain::{Plain, PlainMap};

/// 默认最大嵌套深度
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// 可投影为 `Plain` 的值
///
/// 实现中对子值的递归必须调用 `projector.project(..)`，以便深度保护生效。
pub trait ToPlain {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain>;
}

/// 领域对象的顶层投影入口（`to_object`）
pub trait ToObject {
    /// 使用调用方提供的投影器投影
    fn to_object_in(&self, projector: &mut Projector) -> DomainResult<Plain>;

    /// 使用默认配置投影
    fn to_object(&self) -> DomainResult<Plain> {
        self.to_object_in(&mut Projector::default())
    }

    /// 完全交由适配器转换，跳过默认投影
    fn to_object_with<A, To>(&self, adapter: &A) -> To
    where
        Self: Sized,
        A: Adapter<Self, To> + ?Sized,
    {
        adapter.adapt_one(self)
    }
}

/// 投影配置
#[derive(Debug, Clone, Copy, Builder)]
pub struct ProjectionConfig {
    /// 允许的最大嵌套深度（顶层值计为 1）
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// 投影器：携带配置并跟踪当前嵌套深度
#[derive(Debug, Default)]
pub struct Projector {
    config: ProjectionConfig,
    depth: usize,
}

impl Projector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config, depth: 0 }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// 当前嵌套深度
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// 投影一个值（深度 +1）
    pub fn project<T>(&mut self, value: &T) -> DomainResult<Plain>
    where
        T: ToPlain + ?Sized,
    {
        if self.depth >= self.config.max_depth {
            tracing::warn!(
                max_depth = self.config.max_depth,
                "projection depth exceeded, rejecting object graph"
            );
            return Err(DomainError::DepthExceeded {
                max_depth: self.config.max_depth,
            });
        }

        self.depth += 1;
        let out = value.to_plain(self);
        self.depth -= 1;
        out
    }

    /// 逐元素投影为数组
    pub fn project_seq<'a, I, T>(&mut self, items: I) -> DomainResult<Plain>
    where
        I: IntoIterator<Item = &'a T>,
        T: ToPlain + ?Sized + 'a,
    {
        let items = items
            .into_iter()
            .map(|item| self.project(item))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Plain::Array(items))
    }

    /// 投影为对象，键通过 `Display` 转为字符串
    pub fn project_map<'a, I, K, V>(&mut self, entries: I) -> DomainResult<Plain>
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: Display + ?Sized + 'a,
        V: ToPlain + ?Sized + 'a,
    {
        let mut map = PlainMap::new();
        for (key, value) in entries {
            let value = self.project(value)?;
            map.insert(key.to_string(), value);
        }
        Ok(Plain::Object(map))
    }
}

/// 将属性投影为对象映射
///
/// ```
/// use ddd_core::identifier::Identifier;
/// use ddd_core::projection::{ToPlain, serialize_props};
/// use indexmap::IndexMap;
///
/// let mut props: IndexMap<&str, Box<dyn ToPlain>> = IndexMap::new();
/// props.insert("id", Box::new(Identifier::existing("x")));
/// props.insert("count", Box::new(3));
///
/// let plain = serialize_props(&props).unwrap();
/// assert_eq!(plain["id"].as_str(), Some("x"));
/// assert_eq!(plain["count"].as_i64(), Some(3));
/// ```
pub fn serialize_props<P>(props: &P) -> DomainResult<PlainMap>
where
    P: ToPlain + ?Sized,
{
    serialize_props_in(props, &mut Projector::default())
}

/// 同 `serialize_props`，使用调用方提供的投影器
pub fn serialize_props_in<P>(props: &P, projector: &mut Projector) -> DomainResult<PlainMap>
where
    P: ToPlain + ?Sized,
{
    match projector.project(props)? {
        Plain::Object(map) => Ok(map),
        other => Err(DomainError::projection(format!(
            "props must project to an object, got {}",
            other.kind()
        ))),
    }
}

// ---- 标识与日期 ----

impl ToPlain for Identifier {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::String(self.value().to_string()))
    }
}

impl<Tz: TimeZone> ToPlain for DateTime<Tz> {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::Date(self.with_timezone(&Utc)))
    }
}

impl ToPlain for SystemTime {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::Date(DateTime::<Utc>::from(*self)))
    }
}

impl ToPlain for Uuid {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::String(self.to_string()))
    }
}

// ---- 原始值 ----

impl ToPlain for bool {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::Bool(*self))
    }
}

macro_rules! impl_to_plain_for_integer {
    ($($t:ty),*) => {
        $(
            impl ToPlain for $t {
                fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
                    Ok(Plain::Number((*self).into()))
                }
            }
        )*
    };
}

impl_to_plain_for_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToPlain for f32 {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::from_f64(f64::from(*self)))
    }
}

impl ToPlain for f64 {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::from_f64(*self))
    }
}

impl ToPlain for char {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::String(self.to_string()))
    }
}

impl ToPlain for str {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::String(self.to_string()))
    }
}

impl ToPlain for String {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::String(self.clone()))
    }
}

impl ToPlain for Cow<'_, str> {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::String(self.to_string()))
    }
}

impl ToPlain for () {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::Null)
    }
}

impl ToPlain for serde_json::Value {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(Plain::from(self.clone()))
    }
}

impl ToPlain for Plain {
    fn to_plain(&self, _projector: &mut Projector) -> DomainResult<Plain> {
        Ok(self.clone())
    }
}

// ---- 透明包装 ----

impl<T: ToPlain> ToPlain for Option<T> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        match self {
            Some(value) => value.to_plain(projector),
            None => Ok(Plain::Null),
        }
    }
}

impl<T: ToPlain + ?Sized> ToPlain for &T {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        (**self).to_plain(projector)
    }
}

impl<T: ToPlain + ?Sized> ToPlain for Box<T> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        (**self).to_plain(projector)
    }
}

impl<T: ToPlain + ?Sized> ToPlain for Rc<T> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        (**self).to_plain(projector)
    }
}

impl<T: ToPlain + ?Sized> ToPlain for Arc<T> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        (**self).to_plain(projector)
    }
}

impl<T: ToPlain + ?Sized> ToPlain for RefCell<T> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        let value = self
            .try_borrow()
            .map_err(|_| DomainError::projection("value is mutably borrowed during projection"))?;
        value.to_plain(projector)
    }
}

// ---- 序列与集合 ----

impl<T: ToPlain> ToPlain for [T] {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_seq(self)
    }
}

impl<T: ToPlain, const N: usize> ToPlain for [T; N] {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_seq(self)
    }
}

impl<T: ToPlain> ToPlain for Vec<T> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_seq(self)
    }
}

impl<T: ToPlain> ToPlain for VecDeque<T> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_seq(self)
    }
}

impl<T: ToPlain, S> ToPlain for HashSet<T, S> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_seq(self)
    }
}

impl<T: ToPlain> ToPlain for BTreeSet<T> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_seq(self)
    }
}

impl<T: ToPlain, S> ToPlain for IndexSet<T, S> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_seq(self)
    }
}

// ---- 映射 ----

impl<K: Display, V: ToPlain, S> ToPlain for HashMap<K, V, S> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_map(self)
    }
}

impl<K: Display, V: ToPlain> ToPlain for BTreeMap<K, V> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_map(self)
    }
}

impl<K: Display, V: ToPlain, S> ToPlain for IndexMap<K, V, S> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project_map(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Node {
        name: String,
        next: Option<Rc<RefCell<Node>>>,
    }

    impl ToPlain for Node {
        fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
            let mut map = PlainMap::new();
            map.insert("name".into(), projector.project(&self.name)?);
            map.insert("next".into(), projector.project(&self.next)?);
            Ok(Plain::Object(map))
        }
    }

    fn bag() -> IndexMap<&'static str, Box<dyn ToPlain>> {
        IndexMap::new()
    }

    // 标识、日期、集合、映射的投影规则
    #[test]
    fn projects_ids_dates_sets_and_maps() {
        let when = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut props = bag();
        props.insert("id", Box::new(Identifier::existing("x")));
        props.insert("when", Box::new(when));
        props.insert("tags", Box::new(BTreeSet::from([1, 2])));
        props.insert("meta", Box::new(BTreeMap::from([("a", 1)])));

        let plain = serialize_props(&props).unwrap();
        assert_eq!(plain["id"], Plain::String("x".into()));
        assert_eq!(plain["when"], Plain::Date(when));
        assert_eq!(
            plain["tags"],
            Plain::Array(vec![Plain::Number(1.into()), Plain::Number(2.into())])
        );
        assert_eq!(plain["meta"].get("a").and_then(Plain::as_i64), Some(1));
        assert_eq!(
            plain.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["id", "when", "tags", "meta"]
        );
    }

    // 原始值保持不变，日期不被字符串化
    #[test]
    fn preserves_primitives() {
        let mut props = bag();
        props.insert("value", Box::new(123));
        props.insert("status", Box::new(true));
        props.insert("ratio", Box::new(0.5));
        props.insert("missing", Box::new(None::<String>));
        props.insert(
            "created_at",
            Box::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        );

        let plain = serialize_props(&props).unwrap();
        assert_eq!(plain["value"].as_i64(), Some(123));
        assert_eq!(plain["status"].as_bool(), Some(true));
        assert_eq!(plain["ratio"].as_f64(), Some(0.5));
        assert!(plain["missing"].is_null());
        assert_eq!(
            Plain::Object(plain.clone()).to_json()["created_at"],
            "2024-01-01T00:00:00.000Z"
        );
        assert!(plain["created_at"].as_date().is_some());
    }

    fn plain_of<T: ToPlain + ?Sized>(value: &T) -> Plain {
        Projector::default().project(value).unwrap()
    }

    fn numbers(values: &[i64]) -> Plain {
        Plain::Array(values.iter().map(|v| Plain::Number((*v).into())).collect())
    }

    // 哈希集合投影为数组，元素不丢失
    #[test]
    fn hash_set_becomes_array() {
        let plain = plain_of(&HashSet::from([3, 1, 2]));
        let mut items: Vec<i64> = plain
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Plain::as_i64)
            .collect();
        items.sort_unstable();
        assert_eq!(items, vec![1, 2, 3]);
    }

    // 有序集合与双端队列保持迭代顺序
    #[test]
    fn index_set_and_deque_keep_order() {
        let set: IndexSet<i64> = [3, 1, 2].into_iter().collect();
        assert_eq!(plain_of(&set), numbers(&[3, 1, 2]));

        let mut deque = VecDeque::from([2, 3]);
        deque.push_front(1);
        assert_eq!(plain_of(&deque), numbers(&[1, 2, 3]));
    }

    // 非字符串键通过 Display 转为字符串
    #[test]
    fn map_keys_are_stringified() {
        let plain = plain_of(&HashMap::from([(1u32, "one"), (2u32, "two")]));
        let object = plain.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["1"].as_str(), Some("one"));
        assert_eq!(object["2"].as_str(), Some("two"));

        let id = Uuid::nil();
        let plain = plain_of(&HashMap::from([(id, true)]));
        assert_eq!(
            plain["00000000-0000-0000-0000-000000000000"].as_bool(),
            Some(true)
        );
    }

    // IndexMap 保持插入顺序
    #[test]
    fn index_map_keeps_insertion_order() {
        let mut map = IndexMap::new();
        map.insert(10u8, "b");
        map.insert(2u8, "a");
        let plain = plain_of(&map);
        let object = plain.as_object().unwrap();
        assert_eq!(
            object.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["10", "2"]
        );
        assert_eq!(plain["2"].as_str(), Some("a"));
    }

    // SystemTime 保持日期类型，Uuid 投影为字符串
    #[test]
    fn system_time_and_uuid() {
        let when = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_704_067_200);
        assert_eq!(
            plain_of(&when),
            Plain::Date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );

        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            plain_of(&id),
            Plain::String("67e55044-10b1-426f-9247-bb680e5fe0c8".into())
        );
    }

    // 空属性投影为空对象
    #[test]
    fn empty_props() {
        assert!(serialize_props(&bag()).unwrap().is_empty());
    }

    // 非对象属性被拒绝
    #[test]
    fn non_object_props_rejected() {
        match serialize_props(&42).unwrap_err() {
            DomainError::Projection { reason } => assert!(reason.contains("number")),
            other => panic!("unexpected {other:?}"),
        }
    }

    // 序列保持顺序，嵌套序列递归投影
    #[test]
    fn nested_sequences_keep_order() {
        let value = vec![vec!["a", "b"], vec![], vec!["c"]];
        let plain = Projector::default().project(&value).unwrap();
        assert_eq!(
            plain.to_json(),
            serde_json::json!([["a", "b"], [], ["c"]])
        );
    }

    // 自引用对象图在达到最大深度时被拒绝而非栈溢出
    #[test]
    fn cyclic_graph_is_rejected() {
        let node = Rc::new(RefCell::new(Node {
            name: "loop".into(),
            next: None,
        }));
        node.borrow_mut().next = Some(node.clone());

        let mut projector = Projector::new(ProjectionConfig::builder().max_depth(16).build());
        match projector.project(&node).unwrap_err() {
            DomainError::DepthExceeded { max_depth } => assert_eq!(max_depth, 16),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(projector.depth(), 0);

        // 打破环以释放内存
        node.borrow_mut().next = None;
    }

    // 深度预算恰好足够时成功
    #[test]
    fn depth_budget_is_exact() {
        let chain = Node {
            name: "a".into(),
            next: Some(Rc::new(RefCell::new(Node::default()))),
        };
        let mut tight = Projector::new(ProjectionConfig { max_depth: 3 });
        assert!(tight.project(&chain).is_ok());

        let mut too_tight = Projector::new(ProjectionConfig { max_depth: 2 });
        assert!(too_tight.project(&chain).is_err());
    }

    // 正在被可变借用的 RefCell 无法投影
    #[test]
    fn mutably_borrowed_cell_fails() {
        let cell = RefCell::new(1);
        let _guard = cell.borrow_mut();
        assert!(matches!(
            Projector::default().project(&cell),
            Err(DomainError::Projection { .. })
        ));
    }

    // 配置默认值
    #[test]
    fn config_defaults() {
        assert_eq!(ProjectionConfig::default().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ProjectionConfig::builder().build().max_depth, DEFAULT_MAX_DEPTH);
    }
}
