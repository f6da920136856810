use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parenthesized, DeriveInput, Ident, LitStr, Token};

use crate::{field_name, named_fields};

enum Rule {
    ExactlyOne(Vec<Ident>),
    AtLeastOne(Vec<Ident>),
    Conflicting(Vec<Ident>),
    Custom(syn::Path),
}

enum FieldRule {
    Identifier,
    IdentifierIfSet,
    Nested,
}

fn parse_struct_rules(ast: &DeriveInput) -> syn::Result<Vec<Rule>> {
    let mut rules = Vec::new();
    for attr in ast.attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            let kind = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();
            if kind == "custom" {
                let path: LitStr = meta.value()?.parse()?;
                rules.push(Rule::Custom(path.parse()?));
                return Ok(());
            }
            let content;
            parenthesized!(content in meta.input);
            let fields: Vec<Ident> = Punctuated::<Ident, Token![,]>::parse_terminated(&content)?
                .into_iter()
                .collect();
            match kind.as_str() {
                "exactly_one" => rules.push(Rule::ExactlyOne(fields)),
                "at_least_one" => rules.push(Rule::AtLeastOne(fields)),
                "conflicting" => rules.push(Rule::Conflicting(fields)),
                _ => return Err(meta.error(format!("unknown validation rule `{kind}`"))),
            }
            Ok(())
        })?;
    }
    Ok(rules)
}

fn parse_field_rules(field: &syn::Field) -> syn::Result<Vec<FieldRule>> {
    let mut rules = Vec::new();
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("identifier") {
                rules.push(FieldRule::Identifier);
            } else if meta.path.is_ident("identifier_if_set") {
                rules.push(FieldRule::IdentifierIfSet);
            } else if meta.path.is_ident("nested") {
                rules.push(FieldRule::Nested);
            } else {
                return Err(meta.error("expected `identifier`, `identifier_if_set` or `nested`"));
            }
            Ok(())
        })?;
    }
    Ok(rules)
}

pub(crate) fn impl_validate(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = named_fields(ast)?;
    let struct_name = ast.ident.to_string();

    let mut nested = Vec::new();
    let mut identifiers = Vec::new();
    for field in fields.named.iter() {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = field_name(ident);
        for rule in parse_field_rules(field)? {
            match rule {
                FieldRule::Nested => nested.push(quote! {
                    ::snowflake_sdk::validation::Validate::validate_into(&self.#ident, __errors);
                }),
                FieldRule::Identifier => identifiers.push(quote! {
                    ::snowflake_sdk::validation::valid_identifier(__errors, #struct_name, #name, &self.#ident);
                }),
                FieldRule::IdentifierIfSet => identifiers.push(quote! {
                    ::snowflake_sdk::validation::valid_identifier_if_set(__errors, #struct_name, #name, &self.#ident);
                }),
            }
        }
    }

    let rules = parse_struct_rules(ast)?
        .into_iter()
        .map(|rule| {
            let (check, fields) = match rule {
                Rule::Custom(path) => return quote! { #path(self, __errors); },
                Rule::ExactlyOne(fields) => (quote!(exactly_one_value_set), fields),
                Rule::AtLeastOne(fields) => (quote!(at_least_one_value_set), fields),
                Rule::Conflicting(fields) => (quote!(conflicting_fields), fields),
            };
            let names = fields.iter().map(field_name);
            quote! {
                ::snowflake_sdk::validation::#check(
                    __errors,
                    #struct_name,
                    &[#(#names),*],
                    &[#(::snowflake_sdk::sql::SqlValue::is_set(&self.#fields)),*],
                );
            }
        })
        .collect::<Vec<_>>();

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::snowflake_sdk::validation::Validate for #name #ty_generics #where_clause {
            fn validate_into(&self, __errors: &mut ::snowflake_sdk::validation::ValidationErrors) {
                #(#nested)*
                #(#identifiers)*
                #(#rules)*
            }
        }
    })
}
