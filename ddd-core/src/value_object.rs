//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象。约定不可变：需要修改时通过 `with`
//! 构造新的实例，而不是在原实例上调用 `set`。
//!
use std::hash::{Hash, Hasher};
use std::ptr;

use crate::error::DomainResult;
use crate::plain::Plain;
use crate::projection::{Projector, ToObject, ToPlain};
use crate::property::{PropKey, PropertyBag};

/// 值对象容器
///
/// # 示例
///
/// ```
/// use ddd_core::value_object::ValueObject;
///
/// let a = ValueObject::new(("EUR", 100));
/// let b = ValueObject::new(("EUR", 100));
/// assert!(a.equals(&b));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValueObject<P> {
    bag: PropertyBag<P>,
}

impl<P> ValueObject<P> {
    pub fn new(props: P) -> Self {
        Self {
            bag: PropertyBag::new(props),
        }
    }

    pub fn props(&self) -> &P {
        self.bag.props()
    }

    pub fn get<T>(&self, key: PropKey<P, T>) -> &T {
        self.bag.get(key)
    }

    /// 原地写入属性，返回旧值
    pub fn set<T>(&mut self, key: PropKey<P, T>, value: T) -> T {
        self.bag.set(key, value)
    }

    /// 复制后替换单个属性，原实例不变
    pub fn with<T>(&self, key: PropKey<P, T>, value: T) -> Self
    where
        P: Clone,
    {
        let mut next = self.clone();
        next.set(key, value);
        next
    }

    /// 结构相等
    pub fn equals(&self, other: &Self) -> bool
    where
        P: PartialEq,
    {
        ptr::eq(self, other) || self.props() == other.props()
    }

    /// 值对象没有标识，与 `equals` 相同
    pub fn deep_equals(&self, other: &Self) -> bool
    where
        P: PartialEq,
    {
        self.equals(other)
    }

    pub fn into_props(self) -> P {
        self.bag.into_props()
    }
}

impl<P: PartialEq> PartialEq for ValueObject<P> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<P: Eq> Eq for ValueObject<P> {}

impl<P: Hash> Hash for ValueObject<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.props().hash(state);
    }
}

impl<P: ToPlain> ToObject for ValueObject<P> {
    fn to_object_in(&self, projector: &mut Projector) -> DomainResult<Plain> {
        projector.project(self.props())
    }
}

impl<P: ToPlain> ToPlain for ValueObject<P> {
    fn to_plain(&self, projector: &mut Projector) -> DomainResult<Plain> {
        self.to_object_in(projector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddd_macros::Props;

    #[derive(Debug, Clone, PartialEq, Props)]
    struct Money {
        currency: String,
        amount: f64,
    }

    fn eur(amount: f64) -> ValueObject<Money> {
        ValueObject::new(Money {
            currency: "EUR".into(),
            amount,
        })
    }

    // 属性相同即相等
    #[test]
    fn structural_equality() {
        assert!(eur(10.0).equals(&eur(10.0)));
        assert!(eur(10.0).deep_equals(&eur(10.0)));
        assert_ne!(eur(10.0), eur(11.0));
    }

    // 自身比较始终成立，即使包含 NaN
    #[test]
    fn reflexive_with_nan() {
        let odd = eur(f64::NAN);
        assert!(odd.equals(&odd));
        assert!(!odd.equals(&eur(f64::NAN)));
    }

    // with 返回新实例，原实例不变
    #[test]
    fn with_returns_new_instance() {
        let base = eur(10.0);
        let bigger = base.with(Money::AMOUNT, 20.0);
        assert_eq!(*base.get(Money::AMOUNT), 10.0);
        assert_eq!(*bigger.get(Money::AMOUNT), 20.0);
        assert_eq!(bigger.get(Money::CURRENCY), "EUR");
    }

    // 克隆与原实例深度相等
    #[test]
    fn clone_deep_equals() {
        let base = eur(3.5);
        assert!(base.clone().deep_equals(&base));
    }

    // 投影不包含 id
    #[test]
    fn to_object_projects_props_only() {
        assert_eq!(
            eur(1.5).to_object().unwrap().to_json(),
            serde_json::json!({ "currency": "EUR", "amount": 1.5 })
        );
    }
}
