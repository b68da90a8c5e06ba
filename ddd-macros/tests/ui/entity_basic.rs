use ddd_core::entity::Entity;
use ddd_core::projection::ToObject;
use ddd_macros::{Props, entity};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Props)]
struct UserProps {
    name: String,
}

#[entity]
struct User(Entity<UserProps>);

impl User {
    fn create(name: &str) -> Self {
        Self(Entity::new(UserProps { name: name.into() }))
    }

    fn rename(&mut self, name: &str) {
        let _ = self.0.set(UserProps::NAME, name.to_string());
    }
}

#[entity(debug = false)]
struct Silent(Entity<UserProps>);

impl std::fmt::Debug for Silent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Silent(..)")
    }
}

fn main() {
    let mut user = User::create("neo");
    user.rename("trinity");

    // Deref 提供只读的容器 API
    assert!(user.is_new());
    assert_eq!(user.get(UserProps::NAME).unwrap(), "trinity");
    let _ = format!("{:?}", user);

    // Clone/Eq/Hash 派生可用
    let copy = user.clone();
    assert_eq!(copy, user);
    let set: HashSet<User> = [user.clone(), copy].into_iter().collect();
    assert_eq!(set.len(), 1);

    // 模块内工厂与 AsRef
    let back = User::from_inner(user.as_ref().clone());
    assert!(back.equals(&user));

    let plain = user.to_object().unwrap();
    assert_eq!(plain["id"].as_str(), Some(user.id().value()));

    let silent = Silent::from_inner(Entity::with_id(UserProps { name: "x".into() }, "s-1"));
    assert_eq!(format!("{:?}", silent), "Silent(..)");
}
