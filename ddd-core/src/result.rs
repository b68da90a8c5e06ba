//! Result 辅助（成功/失败包装）
//!
//! 直接复用标准库 `Result<T, E>` 作为带标签的二选一联合：成功与失败恰有其一，
//! 构造层面的“同时存在/都不存在”在类型上不可表示。本模块补充：
//! - `ResultExt`：`get_err` 非抛出检查、`expect_or`/`expect_msg` 以自定义错误覆盖；
//! - `Combine`：按位置顺序合并多个结果，遇到第一个失败即短路返回；
//! - `from_future`：异步桥接，将 future 的失败（含 panic）收敛为失败值；
//! - `catch`/`catch_or`：执行同步闭包，把 panic 捕获为失败值。
//!
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures_util::FutureExt;

use crate::error::{DomainError, DomainResult};

/// 标准 `Result` 的扩展能力
pub trait ResultExt<T, E> {
    /// 返回失败值的引用，成功时为 `None`
    fn get_err(&self) -> Option<&E>;

    /// 失败时以给定错误覆盖原有错误
    fn expect_or<F>(self, error: F) -> Result<T, F>;

    /// 失败时以给定信息构造 `DomainError::Expectation` 覆盖原有错误
    fn expect_msg(self, message: impl Into<String>) -> DomainResult<T>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn get_err(&self) -> Option<&E> {
        self.as_ref().err()
    }

    fn expect_or<F>(self, error: F) -> Result<T, F> {
        self.map_err(|_| error)
    }

    fn expect_msg(self, message: impl Into<String>) -> DomainResult<T> {
        self.map_err(|_| DomainError::Expectation {
            message: message.into(),
        })
    }
}

/// 将一组结果合并为一个结果
///
/// 按位置扫描：返回第一个失败；全部成功时按原顺序返回全部成功值。
///
/// ```
/// use ddd_core::result::Combine;
///
/// let all: Result<(i32, &str), String> = (Ok(1), Ok("two")).combine();
/// assert_eq!(all, Ok((1, "two")));
///
/// let first_err: Result<(i32, i32, i32), String> =
///     (Ok(1), Err("a".to_string()), Err("b".to_string())).combine();
/// assert_eq!(first_err, Err("a".to_string()));
/// ```
pub trait Combine {
    type Output;

    fn combine(self) -> Self::Output;
}

macro_rules! impl_combine_for_tuple {
    ($($name:ident),+) => {
        impl<E, $($name),+> Combine for ($(Result<$name, E>,)+) {
            type Output = Result<($($name,)+), E>;

            #[allow(non_snake_case)]
            fn combine(self) -> Self::Output {
                let ($($name,)+) = self;
                Ok(($($name?,)+))
            }
        }
    };
}

impl_combine_for_tuple!(A);
impl_combine_for_tuple!(A, B);
impl_combine_for_tuple!(A, B, C);
impl_combine_for_tuple!(A, B, C, D);
impl_combine_for_tuple!(A, B, C, D, F);
impl_combine_for_tuple!(A, B, C, D, F, G);
impl_combine_for_tuple!(A, B, C, D, F, G, H);
impl_combine_for_tuple!(A, B, C, D, F, G, H, I);

impl<T, E> Combine for Vec<Result<T, E>> {
    type Output = Result<Vec<T>, E>;

    fn combine(self) -> Self::Output {
        combine_all(self)
    }
}

/// 合并同构结果序列，语义同 `Combine`
pub fn combine_all<I, T, E>(results: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    results.into_iter().collect()
}

/// 异步桥接：等待 future 完成
///
/// future 自身返回的失败原样保留；future 在轮询中 panic 时收敛为
/// `DomainError::Panicked` 并转换为 `E`。不做重试、超时与取消。
pub async fn from_future<F, T, E>(future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DomainError>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => {
            tracing::debug!("future resolved to failure");
            Err(error)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::debug!(%message, "future panicked");
            Err(E::from(DomainError::Panicked { message }))
        }
    }
}

/// 异步桥接：future panic 时返回调用方提供的兜底错误，对 `E` 没有额外约束
pub async fn from_future_or<F, T, E>(future: F, fallback: E) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::debug!(%message, "future panicked, using fallback");
            Err(fallback)
        }
    }
}

/// 执行同步闭包；正常返回为成功，panic 捕获为 `DomainError::Panicked`
pub fn catch<T, F>(f: F) -> DomainResult<T>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| DomainError::Panicked {
        message: panic_message(payload.as_ref()),
    })
}

/// 执行同步闭包；panic 时返回调用方提供的兜底错误
pub fn catch_or<T, E, F>(f: F, fallback: E) -> Result<T, E>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|_| fallback)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
