use ddd_core::aggregate::Aggregate;
use ddd_core::projection::ToObject;
use ddd_macros::{Props, aggregate};

#[derive(Debug, Clone, PartialEq, Props)]
struct CartProps {
    items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum CartEvent {
    ItemAdded(String),
}

#[aggregate]
struct Cart(Aggregate<CartProps, CartEvent>);

impl Cart {
    fn open(id: &str) -> Self {
        Self(Aggregate::with_id(CartProps { items: vec![] }, id))
    }

    fn add(&mut self, item: &str) {
        let _ = self.0.update(CartProps::ITEMS, |items| items.push(item.to_string()));
        self.0.apply(CartEvent::ItemAdded(item.to_string()));
    }

    fn take_events(&mut self) -> Vec<CartEvent> {
        self.0.take_events()
    }
}

fn main() {
    let mut cart = Cart::open("c-1");
    cart.add("apple");
    cart.add("pear");

    assert_eq!(cart.uncommitted_events().len(), 2);
    assert_eq!(cart.props().items, vec!["apple", "pear"]);

    // 克隆不复制未提交事件
    let copy = cart.clone();
    assert!(copy.uncommitted_events().is_empty());
    assert_eq!(copy, cart);

    assert_eq!(cart.take_events().len(), 2);
    assert!(cart.uncommitted_events().is_empty());

    let plain = cart.to_object().unwrap();
    assert_eq!(plain["id"].as_str(), Some("c-1"));
}
