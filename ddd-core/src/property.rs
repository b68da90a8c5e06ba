//! 属性容器（PropertyBag）
//!
//! 持有一个强类型的属性结构体 `P`，并通过 `PropKey<P, T>` 以“键”的形式读写单个属性。
//! 键通常由 `#[derive(Props)]` 生成为属性结构体上的关联常量（字段名大写），
//! 例如 `UserProps::NAME`。
//!
use std::fmt;
use std::mem;

use crate::projection::ToPlain;

/// 属性键：属性名 + 读写访问函数
pub struct PropKey<P, T> {
    name: &'static str,
    get: fn(&P) -> &T,
    get_mut: fn(&mut P) -> &mut T,
}

impl<P, T> PropKey<P, T> {
    pub const fn new(name: &'static str, get: fn(&P) -> &T, get_mut: fn(&mut P) -> &mut T) -> Self {
        Self { name, get, get_mut }
    }

    /// 属性名（投影后的键名）
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<'a>(&self, props: &'a P) -> &'a T {
        (self.get)(props)
    }

    pub fn get_mut<'a>(&self, props: &'a mut P) -> &'a mut T {
        (self.get_mut)(props)
    }
}

impl<P, T> Clone for PropKey<P, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, T> Copy for PropKey<P, T> {}

impl<P, T> fmt::Debug for PropKey<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropKey").field(&self.name).finish()
    }
}

/// 可作为领域对象属性的结构体（由 `#[derive(Props)]` 实现）
pub trait Props: ToPlain {
    /// 全部属性名，按声明顺序
    const KEYS: &'static [&'static str];
}

/// 通用属性容器，独占其属性
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyBag<P> {
    props: P,
}

impl<P> PropertyBag<P> {
    pub fn new(props: P) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    pub fn into_props(self) -> P {
        self.props
    }

    /// 全部属性名
    pub fn keys(&self) -> &'static [&'static str]
    where
        P: Props,
    {
        P::KEYS
    }

    /// 按键读取属性
    pub fn get<T>(&self, key: PropKey<P, T>) -> &T {
        key.get(&self.props)
    }

    /// 按键写入属性，返回旧值
    pub fn set<T>(&mut self, key: PropKey<P, T>, value: T) -> T {
        mem::replace(key.get_mut(&mut self.props), value)
    }

    /// 按键原地修改属性
    pub fn update<T, F>(&mut self, key: PropKey<P, T>, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(key.get_mut(&mut self.props))
    }
}
