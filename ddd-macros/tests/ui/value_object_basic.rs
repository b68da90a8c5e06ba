use ddd_core::projection::ToObject;
use ddd_core::value_object::ValueObject;
use ddd_macros::{Props, value_object};

#[derive(Debug, Clone, PartialEq, Props)]
struct MoneyProps {
    currency: String,
    amount: i64,
}

#[value_object]
struct Money(ValueObject<MoneyProps>);

impl Money {
    fn new(currency: &str, amount: i64) -> Self {
        Self(ValueObject::new(MoneyProps {
            currency: currency.into(),
            amount,
        }))
    }

    fn add(&self, amount: i64) -> Self {
        Self(self.0.with(MoneyProps::AMOUNT, self.get(MoneyProps::AMOUNT) + amount))
    }
}

fn main() {
    let a = Money::new("EUR", 10);
    let b = a.add(5);

    assert_eq!(*a.get(MoneyProps::AMOUNT), 10);
    assert_eq!(*b.get(MoneyProps::AMOUNT), 15);
    assert_eq!(a, Money::new("EUR", 10));
    assert!(a.clone().deep_equals(&a));

    let plain = b.to_object().unwrap();
    assert!(plain.get("id").is_none());
    assert_eq!(plain["amount"].as_i64(), Some(15));
}
