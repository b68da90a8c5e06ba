use std::collections::HashSet;

use syn::punctuated::Punctuated;
use syn::{Attribute, Path, Token};

/// 补齐缺失的必需派生
///
/// 用户已有的 `#[derive(..)]` 保持原样；按路径末段判断是否已经派生
/// （`Clone` 与 `std::clone::Clone` 视为同一个），缺失项合并为一个新的
/// `#[derive(..)]` 放在最前。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<Path>) {
    let present: HashSet<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .filter_map(|path| last_ident(&path))
        .collect();

    let missing: Vec<Path> = required
        .into_iter()
        .filter(|path| last_ident(path).is_some_and(|name| !present.contains(&name)))
        .collect();

    if !missing.is_empty() {
        attrs.insert(0, syn::parse_quote!(#[derive(#(#missing),*)]));
    }
}

fn last_ident(path: &Path) -> Option<String> {
    path.segments.last().map(|seg| seg.ident.to_string())
}
