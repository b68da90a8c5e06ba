use crate::derive_utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Item, Result, parse_macro_input};

/// 包装的领域对象种类
#[derive(Clone, Copy)]
pub(crate) enum Kind {
    Entity,
    ValueObject,
    Aggregate,
}

impl Kind {
    fn attr_name(self) -> &'static str {
        match self {
            Kind::Entity => "#[entity]",
            Kind::ValueObject => "#[value_object]",
            Kind::Aggregate => "#[aggregate]",
        }
    }

    // 实体与聚合按标识比较，可作为哈希键
    fn required_derives(self, derive_debug: bool) -> Vec<syn::Path> {
        let mut required: Vec<syn::Path> = vec![syn::parse_quote!(Clone)];
        if derive_debug {
            required.push(syn::parse_quote!(Debug));
        }
        required.push(syn::parse_quote!(PartialEq));
        if matches!(self, Kind::Entity | Kind::Aggregate) {
            required.push(syn::parse_quote!(Eq));
            required.push(syn::parse_quote!(Hash));
        }
        required
    }
}

/// #[entity] / #[value_object] / #[aggregate] 宏实现
/// 仅支持包装核心容器的单字段 tuple struct，例如 `struct User(Entity<UserProps>);`：
/// - 合并/追加派生：Clone, (Debug 可控), PartialEq；实体与聚合另加 Eq, Hash
/// - 实现 `Deref`（只读访问容器 API），不实现 `DerefMut`
/// - 生成模块私有的 `from_inner` 工厂；不提供取出内部容器的公开途径，
///   写操作只能在定义模块内通过 `self.0` 进行
/// - 实现 `AsRef<Inner>`、`ToObject`、`ToPlain`，委托给内部容器
/// - 参数：`debug = true|false`，默认 true
pub(crate) fn expand(kind: Kind, attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut cfg = WrapperAttrConfig::default();
    let parser = syn::meta::parser(|meta| cfg.parse(meta));
    parse_macro_input!(attr with parser);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), format!("{} only on struct", kind.attr_name()))
                .to_compile_error()
                .into();
        }
    };

    let inner = match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => &f.unnamed[0],
        other => {
            return syn::Error::new(
                other.span(),
                format!(
                    "{} requires a tuple struct with exactly one field, e.g., struct User(Entity<UserProps>);",
                    kind.attr_name()
                ),
            )
            .to_compile_error()
            .into();
        }
    };

    // 内部容器必须私有，否则外部可以绕过领域方法直接写属性
    if !matches!(inner.vis, syn::Visibility::Inherited) {
        return syn::Error::new(
            inner.vis.span(),
            format!("{}: the wrapped container must be private", kind.attr_name()),
        )
        .to_compile_error()
        .into();
    }
    let inner_ty = inner.ty.clone();

    apply_derives(
        &mut st.attrs,
        kind.required_derives(cfg.derive_debug.unwrap_or(true)),
    );

    let ident = &st.ident;
    let generics = st.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let project_where = match where_clause {
        Some(wc) => {
            let preds = wc.predicates.iter();
            quote! { where #(#preds,)* #inner_ty: ::ddd_core::projection::ToObject }
        }
        None => quote! { where #inner_ty: ::ddd_core::projection::ToObject },
    };

    let out = quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            /// 由内部容器构造（仅定义模块可见）
            #[allow(dead_code)]
            fn from_inner(inner: #inner_ty) -> Self {
                Self(inner)
            }
        }

        impl #impl_generics ::std::ops::Deref for #ident #ty_generics #where_clause {
            type Target = #inner_ty;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl #impl_generics ::std::convert::AsRef<#inner_ty> for #ident #ty_generics #where_clause {
            fn as_ref(&self) -> &#inner_ty {
                &self.0
            }
        }

        impl #impl_generics ::ddd_core::projection::ToObject for #ident #ty_generics #project_where {
            fn to_object_in(
                &self,
                projector: &mut ::ddd_core::projection::Projector,
            ) -> ::ddd_core::error::DomainResult<::ddd_core::plain::Plain> {
                ::ddd_core::projection::ToObject::to_object_in(&self.0, projector)
            }
        }

        impl #impl_generics ::ddd_core::projection::ToPlain for #ident #ty_generics #project_where {
            fn to_plain(
                &self,
                projector: &mut ::ddd_core::projection::Projector,
            ) -> ::ddd_core::error::DomainResult<::ddd_core::plain::Plain> {
                ::ddd_core::projection::ToObject::to_object_in(&self.0, projector)
            }
        }
    };

    TokenStream::from(out)
}

// -------- parsing --------

#[derive(Default)]
struct WrapperAttrConfig {
    derive_debug: Option<bool>,
}

impl WrapperAttrConfig {
    fn parse(&mut self, meta: ParseNestedMeta) -> Result<()> {
        if meta.path.is_ident("debug") {
            if self.derive_debug.is_some() {
                return Err(meta.error("duplicate key 'debug' in attribute"));
            }
            let lit: syn::LitBool = meta.value()?.parse()?;
            self.derive_debug = Some(lit.value);
            Ok(())
        } else {
            Err(meta.error("unknown key in attribute; expected 'debug'"))
        }
    }
}
