//! 适配器（Adapter）
//!
//! 在领域对象与外部表示（DTO、持久化模型等）之间做转换，
//! 通过 `ToObject::to_object_with` 可完全替代默认投影。
//!
use std::fmt;

/// 转换器：`adapt_one` 必须实现，`adapt_many` 默认逐个映射并保持顺序
pub trait Adapter<I: ?Sized, O> {
    fn adapt_one(&self, item: &I) -> O;

    fn adapt_many(&self, items: &[I]) -> Vec<O>
    where
        I: Sized,
    {
        items.iter().map(|item| self.adapt_one(item)).collect()
    }
}

/// 以闭包实现的适配器
///
/// ```
/// use ddd_core::adapter::{Adapter, FnAdapter};
///
/// let upper = FnAdapter::new(|s: &String| s.to_uppercase());
/// assert_eq!(upper.adapt_many(&["a".to_string(), "b".to_string()]), vec!["A", "B"]);
/// ```
#[derive(Clone, Copy)]
pub struct FnAdapter<F> {
    f: F,
}

impl<F> FnAdapter<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnAdapter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAdapter").finish_non_exhaustive()
    }
}

impl<I, O, F> Adapter<I, O> for FnAdapter<F>
where
    I: ?Sized,
    F: Fn(&I) -> O,
{
    fn adapt_one(&self, item: &I) -> O {
        (self.f)(item)
    }
}

impl<I, O, A> Adapter<I, O> for &A
where
    I: ?Sized,
    A: Adapter<I, O> + ?Sized,
{
    fn adapt_one(&self, item: &I) -> O {
        (**self).adapt_one(item)
    }
}
