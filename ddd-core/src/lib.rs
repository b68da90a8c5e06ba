//! DDD 领域内核（ddd-core）
//!
//! 提供领域建模中与“身份”和“投影”相关的最小构件：
//! - 唯一标识（`identifier`），可注入生成器；
//! - 成功/失败结果辅助（`result`）：合并、异步桥接与 panic 捕获；
//! - 属性容器（`property`）与强类型属性键；
//! - 实体（`entity`）、值对象（`value_object`）与聚合根（`aggregate`）；
//! - 投影引擎（`projection`、`plain`）：把领域对象图转换为可序列化的纯值；
//! - 适配器（`adapter`）与冻结常量表（`constant`）。
//!
//! 典型用法：
//! 1. 用 `#[derive(Props)]` 定义属性结构体；
//! 2. 用 `#[entity]`/`#[value_object]`/`#[aggregate]` 包装核心容器，得到具名的领域类型；
//! 3. 通过 `to_object()` 或 `to_object_with(&adapter)` 输出纯值。
//!
//! 本 crate 不包含持久化、事件存储与依赖注入。
//!
//! # 写保护
//!
//! 包装类型只通过 `Deref` 暴露容器的只读 API，写操作只能在定义模块内经 `self.0` 完成：
//!
//! ```
//! mod users {
//!     use ddd_core::entity::Entity;
//!     use ddd_core::{Props, entity};
//!
//!     #[derive(Debug, Clone, PartialEq, Props)]
//!     pub struct UserProps {
//!         pub name: String,
//!     }
//!
//!     #[entity]
//!     pub struct User(Entity<UserProps>);
//!
//!     impl User {
//!         pub fn register(name: &str) -> Self {
//!             Self::from_inner(Entity::with_id(UserProps { name: name.into() }, "u-1"))
//!         }
//!
//!         pub fn rename(&mut self, name: &str) {
//!             let _ = self.0.set(UserProps::NAME, name.to_string());
//!         }
//!     }
//! }
//!
//! let mut user = users::User::register("neo");
//! user.rename("trinity");
//! assert_eq!(user.get(users::UserProps::NAME).unwrap(), "trinity");
//! ```
//!
//! 模块外无法取出内部容器：
//!
//! ```compile_fail,E0599
//! # mod users {
//! #     use ddd_core::entity::Entity;
//! #     use ddd_core::{Props, entity};
//! #     #[derive(Debug, Clone, PartialEq, Props)]
//! #     pub struct UserProps { pub name: String }
//! #     #[entity]
//! #     pub struct User(Entity<UserProps>);
//! #     impl User {
//! #         pub fn register(name: &str) -> Self {
//! #             Self::from_inner(Entity::with_id(UserProps { name: name.into() }, "u-1"))
//! #         }
//! #     }
//! # }
//! let user = users::User::register("neo");
//! let mut inner = user.into_inner();
//! ```
//!
//! ```compile_fail,E0277
//! # mod users {
//! #     use ddd_core::entity::Entity;
//! #     use ddd_core::{Props, entity};
//! #     #[derive(Debug, Clone, PartialEq, Props)]
//! #     pub struct UserProps { pub name: String }
//! #     #[entity]
//! #     pub struct User(Entity<UserProps>);
//! #     impl User {
//! #         pub fn register(name: &str) -> Self {
//! #             Self::from_inner(Entity::with_id(UserProps { name: name.into() }, "u-1"))
//! #         }
//! #     }
//! # }
//! use ddd_core::entity::Entity;
//!
//! let user = users::User::register("neo");
//! let mut inner: Entity<users::UserProps> = user.into();
//! ```
//!
//! ```compile_fail,E0507
//! # mod users {
//! #     use ddd_core::entity::Entity;
//! #     use ddd_core::{Props, entity};
//! #     #[derive(Debug, Clone, PartialEq, Props)]
//! #     pub struct UserProps { pub name: String }
//! #     #[entity]
//! #     pub struct User(Entity<UserProps>);
//! #     impl User {
//! #         pub fn register(name: &str) -> Self {
//! #             Self::from_inner(Entity::with_id(UserProps { name: name.into() }, "u-1"))
//! #         }
//! #     }
//! # }
//! let user = users::User::register("neo");
//! let props = user.into_props();
//! ```
//!
//! 也无法绕过领域方法直接构造：
//!
//! ```compile_fail,E0624
//! # mod users {
//! #     use ddd_core::entity::Entity;
//! #     use ddd_core::{Props, entity};
//! #     #[derive(Debug, Clone, PartialEq, Props)]
//! #     pub struct UserProps { pub name: String }
//! #     #[entity]
//! #     pub struct User(Entity<UserProps>);
//! # }
//! use ddd_core::entity::Entity;
//!
//! let user = users::User::from_inner(Entity::with_id(users::UserProps { name: "neo".into() }, "u-1"));
//! ```
//!
//! ```compile_fail
//! # mod users {
//! #     use ddd_core::entity::Entity;
//! #     use ddd_core::{Props, entity};
//! #     #[derive(Debug, Clone, PartialEq, Props)]
//! #     pub struct UserProps { pub name: String }
//! #     #[entity]
//! #     pub struct User(Entity<UserProps>);
//! # }
//! use ddd_core::entity::Entity;
//!
//! let user = users::User::from(Entity::with_id(users::UserProps { name: "neo".into() }, "u-1"));
//! ```
//!
//! 内部字段声明为 `pub` 会被宏拒绝：
//!
//! ```compile_fail
//! use ddd_core::entity::Entity;
//! use ddd_core::{Props, entity};
//!
//! #[derive(Debug, Clone, PartialEq, Props)]
//! struct UserProps {
//!     name: String,
//! }
//!
//! #[entity]
//! struct User(pub Entity<UserProps>);
//! ```
//!
pub mod adapter;
pub mod aggregate;
pub mod constant;
pub mod entity;
pub mod error;
pub mod identifier;
pub mod plain;
pub mod projection;
pub mod property;
pub mod result;
pub mod value_object;

pub use ddd_macros::{Props, aggregate, entity, value_object};

/// 常用类型与 trait 一次性导入
pub mod prelude {
    pub use crate::adapter::{Adapter, FnAdapter};
    pub use crate::aggregate::{Aggregate, EventRecorder, UncommittedEvents};
    pub use crate::constant::Constant;
    pub use crate::entity::Entity;
    pub use crate::error::{DomainError, DomainResult};
    pub use crate::identifier::{IdGenerator, Identifier};
    pub use crate::plain::{Plain, PlainMap};
    pub use crate::projection::{ProjectionConfig, Projector, ToObject, ToPlain, serialize_props};
    pub use crate::property::{PropKey, Props, PropertyBag};
    pub use crate::result::{
        Combine, ResultExt, catch, catch_or, combine_all, from_future, from_future_or,
    };
    pub use crate::value_object::ValueObject;
    pub use ddd_macros::{aggregate, entity, value_object};
}

// 允许在本 crate 内部通过 ::ddd_core 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::ddd_core 路径。
extern crate self as ddd_core;
