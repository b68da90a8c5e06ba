//! ddd-core 的过程宏
//!
//! - `#[derive(Props)]`：属性结构体的投影与强类型属性键
//! - `#[entity]` / `#[value_object]` / `#[aggregate]`：把包装核心容器的 tuple struct
//!   变成具名的领域类型
//!
use proc_macro::TokenStream;

mod derive_utils;
mod props;
mod wrapper;

use wrapper::Kind;

/// 属性结构体派生
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Props)]
/// struct UserProps {
///     name: String,
///     #[props(rename = "createdAt")]
///     created_at: DateTime<Utc>,
///     #[props(skip)]
///     cache: Option<String>,
/// }
///
/// let name = user.get(UserProps::NAME)?;
/// ```
#[proc_macro_derive(Props, attributes(props))]
pub fn derive_props(input: TokenStream) -> TokenStream {
    props::expand(input)
}

/// 实体包装宏：`#[entity] struct User(Entity<UserProps>);`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    wrapper::expand(Kind::Entity, attr, item)
}

/// 值对象包装宏：`#[value_object] struct Money(ValueObject<MoneyProps>);`
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    wrapper::expand(Kind::ValueObject, attr, item)
}

/// 聚合根包装宏：`#[aggregate] struct Order(Aggregate<OrderProps, OrderEvent>);`
#[proc_macro_attribute]
pub fn aggregate(attr: TokenStream, item: TokenStream) -> TokenStream {
    wrapper::expand(Kind::Aggregate, attr, item)
}
