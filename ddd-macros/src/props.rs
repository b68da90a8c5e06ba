use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, LitStr, Result, parse_macro_input};

/// #[derive(Props)] 宏实现
/// - 仅支持具名字段结构体
/// - 实现 `ToPlain`：按声明顺序投影为对象
/// - 实现 `Props`：`KEYS` 为全部（未跳过的）属性名
/// - 为每个字段生成关联常量 `PropKey<Self, FieldTy>`，常量名为字段名大写，可见性与字段一致
/// - 字段参数：`#[props(rename = "...")]` 修改属性名，`#[props(skip)]` 不参与投影与 `KEYS`
pub(crate) fn expand(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_props(&input) {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_props(input: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "#[derive(Props)] supports only named-field structs",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "#[derive(Props)] supports only structs",
            ));
        }
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut projected = Vec::new();
    let mut keys = Vec::new();
    let mut accessors = Vec::new();
    let mut bounds = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let cfg = FieldConfig::from_attrs(&field.attrs)?;
        let raw = field_ident.to_string();
        let raw = raw.strip_prefix("r#").unwrap_or(&raw);
        let name = cfg.rename.map(|lit| lit.value()).unwrap_or_else(|| raw.to_string());
        let ty = &field.ty;
        let vis = &field.vis;

        let const_ident = format_ident!("{}", raw.to_uppercase(), span = field_ident.span());
        let ref_fn = format_ident!("__prop_ref_{}", raw);
        let mut_fn = format_ident!("__prop_mut_{}", raw);

        accessors.push(quote! {
            #vis const #const_ident: ::ddd_core::property::PropKey<Self, #ty> =
                ::ddd_core::property::PropKey::new(#name, Self::#ref_fn, Self::#mut_fn);

            #[doc(hidden)]
            fn #ref_fn(props: &Self) -> &#ty {
                &props.#field_ident
            }

            #[doc(hidden)]
            fn #mut_fn(props: &mut Self) -> &mut #ty {
                &mut props.#field_ident
            }
        });

        if cfg.skip {
            continue;
        }

        projected.push(quote! {
            map.insert(
                ::std::string::String::from(#name),
                projector.project(&self.#field_ident)?,
            );
        });
        keys.push(name);
        bounds.push(quote! { #ty: ::ddd_core::projection::ToPlain });
    }

    // 仅在存在泛型参数时为字段类型追加 ToPlain 约束
    let has_type_params = input.generics.type_params().next().is_some();
    let plain_where = match (where_clause, has_type_params) {
        (Some(wc), true) => {
            let preds = wc.predicates.iter();
            quote! { where #(#preds,)* #(#bounds,)* }
        }
        (None, true) => quote! { where #(#bounds,)* },
        (Some(wc), false) => quote! { #wc },
        (None, false) => quote! {},
    };
    let capacity = keys.len();

    Ok(quote! {
        impl #impl_generics ::ddd_core::projection::ToPlain for #ident #ty_generics #plain_where {
            #[allow(unused_mut, unused_variables)]
            fn to_plain(
                &self,
                projector: &mut ::ddd_core::projection::Projector,
            ) -> ::ddd_core::error::DomainResult<::ddd_core::plain::Plain> {
                let mut map = ::ddd_core::plain::PlainMap::with_capacity(#capacity);
                #(#projected)*
                ::std::result::Result::Ok(::ddd_core::plain::Plain::Object(map))
            }
        }

        impl #impl_generics ::ddd_core::property::Props for #ident #ty_generics #plain_where {
            const KEYS: &'static [&'static str] = &[#(#keys),*];
        }

        #[allow(dead_code)]
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#accessors)*
        }
    })
}

// -------- parsing --------

#[derive(Default)]
struct FieldConfig {
    rename: Option<LitStr>,
    skip: bool,
}

impl FieldConfig {
    fn from_attrs(attrs: &[syn::Attribute]) -> Result<Self> {
        let mut cfg = FieldConfig::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("props")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if cfg.rename.is_some() {
                        return Err(meta.error("duplicate key 'rename' in attribute"));
                    }
                    cfg.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    cfg.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown key in attribute; expected 'rename' or 'skip'"))
                }
            })?;
        }
        Ok(cfg)
    }
}
