use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr};

use crate::{field_name, named_fields};

pub(crate) fn impl_snowflake_deserialize(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = named_fields(ast)?;
    let mut conversions = Vec::with_capacity(fields.named.len());
    for field in fields.named.iter() {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let mut column = field_name(ident);
        let mut json = false;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("snowflake")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("json") {
                    json = true;
                } else if meta.path.is_ident("rename") {
                    column = meta.value()?.parse::<LitStr>()?.value();
                } else {
                    return Err(meta.error("expected `json` or `rename = \"...\"`"));
                }
                Ok(())
            })?;
        }
        let ty = &field.ty;
        conversions.push(if json {
            quote! {
                #ident: ::snowflake_sdk::driver::deserialize_json_cell::<#ty>(row, #column)?
            }
        } else {
            quote! {
                #ident: ::snowflake_sdk::driver::deserialize_cell::<#ty>(row, #column)?
            }
        });
    }

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::snowflake_sdk::driver::SnowflakeDeserialize for #name #ty_generics #where_clause {
            fn snowflake_deserialize(
                row: &::snowflake_sdk::driver::Row<'_>,
            ) -> ::std::result::Result<Self, ::snowflake_sdk::driver::DeserializeError> {
                ::std::result::Result::Ok(#name {
                    #(#conversions,)*
                })
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_reaches_the_driver_through_the_sdk() {
        let ast: DeriveInput = syn::parse_quote! {
            struct RoleRow {
                name: String,
                #[snowflake(rename = "type", json)]
                kind: Option<String>,
            }
        };
        let expanded = impl_snowflake_deserialize(&ast).unwrap().to_string();
        assert!(expanded.contains(":: snowflake_sdk :: driver :: SnowflakeDeserialize for RoleRow"));
        assert!(expanded.contains(":: snowflake_sdk :: driver :: deserialize_json_cell"));
        assert!(expanded.contains("\"type\""));
        assert!(!expanded.contains(":: snowflake_driver ::"));
    }

    #[test]
    fn unknown_field_options_are_rejected() {
        let ast: DeriveInput = syn::parse_quote! {
            struct RoleRow {
                #[snowflake(flatten)]
                name: String,
            }
        };
        let error = impl_snowflake_deserialize(&ast).unwrap_err();
        assert!(error.to_string().contains("expected `json` or `rename"));
    }
}
