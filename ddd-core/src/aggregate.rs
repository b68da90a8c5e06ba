//! 聚合（Aggregate）
//!
//! 聚合根 = 实体（同样的标识与相等性约定）+ 组合进来的事件记录能力：
//! - `apply` 将事件登记为未提交事件；
//! - `uncommitted_events` 按登记顺序返回；
//! - 默认记录器 `UncommittedEvents` 支持 `take` 一次性取走，交给外部发布者。
//!
//! 不负责事件回放与事件存储。
//!
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::entity::Entity;
use crate::error::DomainResult;
use crate::identifier::{IdGenerator, Identifier};
use crate::plain::Plain;
use crate::projection::{Projector, ToObject, ToPlain};
use crate::property::PropKey;

/// 事件记录能力
pub trait EventRecorder<E> {
    /// 登记一个未提交事件
    fn apply(&mut self, event: E);

    /// 按登记顺序返回未提交事件
    fn uncommitted_events(&self) -> &[E];
}

/// 默认记录器：内存中的未提交事件队列
#[derive(Debug, Clone, PartialEq)]
pub struct UncommittedEvents<E> {
    events: Vec<E>,
}

impl<E> UncommittedEvents<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// 取走全部未提交事件，队列清空
    pub fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<E> Default for UncommittedEvents<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventRecorder<E> for UncommittedEvents<E> {
    fn apply(&mut self, event: E) {
        self.events.push(event);
    }

    fn uncommitted_events(&self) -> &[E] {
        &self.events
    }
}

/// 聚合根容器
pub struct Aggregate<P, E, R = UncommittedEvents<E>> {
    root: Entity<P>,
    recorder: R,
    _event: PhantomData<fn(E)>,
}

impl<P, E, R> Aggregate<P, E, R>
where
    R: EventRecorder<E> + Default,
{
    /// 使用新生成的标识创建
    pub fn new(props: P) -> Self {
        Self::from_root(Entity::new(props), R::default())
    }

    /// 使用调用方提供的标识创建
    pub fn with_id(props: P, id: impl Into<Identifier>) -> Self {
        Self::from_root(Entity::with_id(props, id), R::default())
    }

    /// 使用注入的生成器生成标识
    pub fn with_generator<G>(props: P, generator: &G) -> Self
    where
        G: IdGenerator + ?Sized,
    {
        Self::from_root(Entity::with_generator(props, generator), R::default())
    }
}

impl<P, E, R> Aggregate<P, E, R>
where
    R: EventRecorder<E>,
{
    /// 使用调用方提供的标识与记录器创建
    pub fn with_recorder(props: P, id: impl Into<Identifier>, recorder: R) -> Self {
        Self::from_root(Entity::with_id(props, id), recorder)
    }

    fn from_root(root: Entity<P>, recorder: R) -> Self {
        Self {
            root,
            recorder,
            _event: PhantomData,
        }
    }

    pub fn id(&self) -> &Identifier {
        self.root.id()
    }

    pub fn is_new(&self) -> bool {
        self.root.is_new()
    }

    pub fn props(&self) -> &P {
        self.root.props()
    }

    /// 按键读取属性；键名为 `id` 时拒绝
    pub fn get<T>(&self, key: PropKey<P, T>) -> DomainResult<&T> {
        self.root.get(key)
    }

    /// 按键写入属性并返回旧值；键名为 `id` 时拒绝
    pub fn set<T>(&mut self, key: PropKey<P, T>, value: T) -> DomainResult<T> {
        self.root.set(key, value)
    }

    /// 按键原地修改属性；键名为 `id` 时拒绝
    pub fn update<T, F>(&mut self, key: PropKey<P, T>, f: F) -> DomainResult<()>
    where
        F: FnOnce(&mut T),
    {
        self.root.update(key, f)
    }

    /// 登记未提交事件
    pub fn apply(&mut self, event: E) {
        self.recorder.apply(event);
    }

    pub fn uncommitted_events(&self) -> &[E] {
        self.recorder.uncommitted_events()
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut R {
        &mut self.recorder
    }

    /// 以实体视角访问聚合根
    pub fn as_entity(&self) -> &Entity<P> {
        &self.root
    }

    /// 标识相等即相等
    pub fn equals(&self, other: &Self) -> bool {
        self.root.equals(&other.root)
    }

    /// 标识相等且属性结构相等
    pub fn deep_equals(&self, other: &Self) -> bool
    where
        P: PartialEq,
    {
        self.root.deep_equals(&other.root)
    }

    pub fn into_props(self) -> P {
        self.root.into_props()
    }

    /// 拆分为聚合根实体与记录器
    pub fn into_parts(self) -> (Entity<P>, R) {
        (self.root, self.recorder)
    }
}

impl<P, E> Aggregate<P, E> {
    /// 取走全部未提交事件
    pub fn take_events(&mut self) -> Vec<E> {
        self.recorder.take()
    }
}

// 克隆保留标识与属性，未提交事件不随之复制
impl<P: Clone, E, R: Default> Clone for Aggregate<P, E, R> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            recorder: R::default(),
            _event: PhantomData,
        }
    }
}

impl<P: fmt::Debug, E, R: fmt::Debug> fmt::Debug for Aggregate<P, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("id", self.root.id())
            .field("props", self.root.props())
            .field("recorder", &self.recorder)
            .finish()
    }
}

impl<P, E, R> PartialEq for Aggregate<P, E, R> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<P, E, R> Eq for Aggregate<P, E, R> {}

impl<P, E, R> Hash for Aggregate<P, E, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
    }
}

impl<P: ToPlain, E, R> ToObject for Aggregate<P, E, R> {
    fn to_object_in(&self, projector: &mut Projector) -> DomainResult<Plain> {
        self.root.to_object_in(projector)
    }
}

impl<P: ToPlain, E, R> ToPlain for Aggregate<P, E, R> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        self.to_object_in(projector)
    }
}
