//! 实体（Entity）
//!
//! 属性容器 + 唯一标识。标识存放在属性之外，构造后不可变；
//! 相等性只看标识，`deep_equals` 额外比较属性。
//!
use std::hash::{Hash, Hasher};
use std::ptr;

use crate::error::{DomainError, DomainResult};
use crate::identifier::{IdGenerator, Identifier};
use crate::plain::Plain;
use crate::projection::{Projector, ToObject, ToPlain, serialize_props_in};
use crate::property::{PropKey, PropertyBag};

/// 受保护的身份属性名
pub const ID_KEY: &str = "id";

/// 具备唯一标识的领域对象
///
/// ```
/// use ddd_core::entity::Entity;
///
/// let a = Entity::with_id(1, "user-1");
/// let b = Entity::with_id(2, "user-1");
/// assert!(a.equals(&b));
/// assert!(!a.deep_equals(&b));
/// ```
#[derive(Debug, Clone)]
pub struct Entity<P> {
    id: Identifier,
    bag: PropertyBag<P>,
}

impl<P> Entity<P> {
    /// 使用新生成的标识创建
    pub fn new(props: P) -> Self {
        Self::with_identifier(props, Identifier::generate())
    }

    /// 使用调用方提供的标识创建（字符串或 `Identifier`，空串视为省略）
    pub fn with_id(props: P, id: impl Into<Identifier>) -> Self {
        Self::with_identifier(props, id.into())
    }

    /// 使用注入的生成器生成标识
    pub fn with_generator<G>(props: P, generator: &G) -> Self
    where
        G: IdGenerator + ?Sized,
    {
        Self::with_identifier(props, Identifier::generate_with(generator))
    }

    fn with_identifier(props: P, id: Identifier) -> Self {
        Self {
            id,
            bag: PropertyBag::new(props),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_new()
    }

    pub fn props(&self) -> &P {
        self.bag.props()
    }

    /// 按键读取属性；键名为 `id` 时拒绝
    pub fn get<T>(&self, key: PropKey<P, T>) -> DomainResult<&T> {
        guard_identity(key.name())?;
        Ok(self.bag.get(key))
    }

    /// 按键写入属性并返回旧值；键名为 `id` 时拒绝
    pub fn set<T>(&mut self, key: PropKey<P, T>, value: T) -> DomainResult<T> {
        guard_identity(key.name())?;
        Ok(self.bag.set(key, value))
    }

    /// 按键原地修改属性；键名为 `id` 时拒绝
    pub fn update<T, F>(&mut self, key: PropKey<P, T>, f: F) -> DomainResult<()>
    where
        F: FnOnce(&mut T),
    {
        guard_identity(key.name())?;
        self.bag.update(key, f);
        Ok(())
    }

    /// 标识相等即相等
    pub fn equals(&self, other: &Self) -> bool {
        ptr::eq(self, other) || self.id == other.id
    }

    /// 标识相等且属性结构相等
    pub fn deep_equals(&self, other: &Self) -> bool
    where
        P: PartialEq,
    {
        ptr::eq(self, other) || (self.id == other.id && self.props() == other.props())
    }

    pub fn into_props(self) -> P {
        self.bag.into_props()
    }

    pub fn into_parts(self) -> (Identifier, P) {
        (self.id, self.bag.into_props())
    }
}

pub(crate) fn guard_identity(key: &str) -> DomainResult<()> {
    if key == ID_KEY {
        return Err(DomainError::identity_protected(key));
    }
    Ok(())
}

/// 投影属性后写入 `id`：已有 `id` 键时原位覆盖，否则追加在末尾
pub(crate) fn project_identified<P>(
    id: &Identifier,
    props: &P,
    projector: &mut Projector,
) -> DomainResult<Plain>
where
    P: ToPlain + ?Sized,
{
    let mut map = serialize_props_in(props, projector)?;
    map.insert(ID_KEY.to_string(), Plain::String(id.value().to_string()));
    Ok(Plain::Object(map))
}

impl<P> PartialEq for Entity<P> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<P> Eq for Entity<P> {}

impl<P> Hash for Entity<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<P: ToPlain> ToObject for Entity<P> {
    fn to_object_in(&self, projector: &mut Projector) -> DomainResult<Plain> {
        project_identified(&self.id, self.props(), projector)
    }
}

impl<P: ToPlain> ToPlain for Entity<P> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        self.to_object_in(projector)
    }
}
