use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{DeriveInput, Ident, LitStr, Token};

use crate::named_fields;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Static,
    Keyword,
    Parameter,
    Identifier,
    List,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quotes {
    None,
    Single,
    Double,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Equals {
    Equals,
    None,
    Arrow,
}

struct Ddl {
    strategy: Strategy,
    sql: String,
    quotes: Quotes,
    equals: Equals,
    equals_flag: bool,
    parentheses: bool,
    must_parentheses: bool,
    no_parentheses: bool,
    no_comma: bool,
}

struct DdlItem {
    name: Ident,
    value: Option<LitStr>,
}

impl Parse for DdlItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        // `static` is a keyword, so plain `Ident` parsing would reject it.
        let name = input.call(Ident::parse_any)?;
        let value = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        Ok(DdlItem { name, value })
    }
}

impl Ddl {
    fn from_attribute(attr: &syn::Attribute) -> syn::Result<Self> {
        let items = attr.parse_args_with(Punctuated::<DdlItem, Token![,]>::parse_terminated)?;
        let mut items = items.into_iter();
        let first = items
            .next()
            .ok_or_else(|| syn::Error::new_spanned(attr, "missing ddl strategy"))?;
        let strategy = match first.name.to_string().as_str() {
            "static" => Strategy::Static,
            "keyword" => Strategy::Keyword,
            "parameter" => Strategy::Parameter,
            "identifier" => Strategy::Identifier,
            "list" => Strategy::List,
            other => {
                return Err(syn::Error::new(
                    first.name.span(),
                    format!("unknown ddl strategy `{other}`"),
                ))
            }
        };
        let mut ddl = Ddl {
            strategy,
            sql: String::new(),
            quotes: Quotes::None,
            equals: Equals::Equals,
            equals_flag: false,
            parentheses: false,
            must_parentheses: false,
            no_parentheses: false,
            no_comma: false,
        };
        for item in items {
            match (item.name.to_string().as_str(), item.value) {
                ("sql", Some(sql)) => ddl.sql = sql.value(),
                ("single_quotes", None) => ddl.quotes = Quotes::Single,
                ("double_quotes", None) => ddl.quotes = Quotes::Double,
                ("no_equals", None) => ddl.equals = Equals::None,
                ("arrow_equals", None) => ddl.equals = Equals::Arrow,
                ("equals", None) => ddl.equals_flag = true,
                ("parentheses", None) => ddl.parentheses = true,
                ("must_parentheses", None) => ddl.must_parentheses = true,
                ("no_parentheses", None) => ddl.no_parentheses = true,
                ("no_comma", None) => ddl.no_comma = true,
                (other, _) => {
                    return Err(syn::Error::new(
                        item.name.span(),
                        format!("unknown ddl modifier `{other}`"),
                    ))
                }
            }
        }
        if ddl.strategy == Strategy::Static && ddl.sql.is_empty() {
            return Err(syn::Error::new_spanned(attr, "static clauses need `sql`"));
        }
        Ok(ddl)
    }

    fn quotes(&self) -> TokenStream {
        match self.quotes {
            Quotes::None => quote!(::snowflake_sdk::sql::Quotes::None),
            Quotes::Single => quote!(::snowflake_sdk::sql::Quotes::Single),
            Quotes::Double => quote!(::snowflake_sdk::sql::Quotes::Double),
        }
    }

    fn render(&self, field: &Ident) -> TokenStream {
        let sql = &self.sql;
        let quotes = self.quotes();
        match self.strategy {
            Strategy::Static => quote! {
                let _ = &self.#field;
                __builder.static_keyword(#sql);
            },
            Strategy::Keyword => quote! {
                __builder.keyword(#sql, &self.#field, #quotes);
            },
            Strategy::Parameter => {
                let equals = match self.equals {
                    Equals::Equals => quote!(::snowflake_sdk::sql::ParameterEquals::Equals),
                    Equals::None => quote!(::snowflake_sdk::sql::ParameterEquals::None),
                    Equals::Arrow => quote!(::snowflake_sdk::sql::ParameterEquals::Arrow),
                };
                let parentheses = self.parentheses || self.must_parentheses;
                quote! {
                    __builder.parameter(#sql, &self.#field, ::snowflake_sdk::sql::ParameterOptions {
                        quotes: #quotes,
                        equals: #equals,
                        parentheses: #parentheses,
                    });
                }
            }
            Strategy::Identifier => {
                let equals = self.equals_flag;
                quote! {
                    __builder.identifier(#sql, &self.#field, #equals);
                }
            }
            Strategy::List => {
                let separator = if self.no_comma {
                    quote!(::snowflake_sdk::sql::ListSeparator::Space)
                } else {
                    quote!(::snowflake_sdk::sql::ListSeparator::Comma)
                };
                let parentheses = !self.no_parentheses;
                let must = self.must_parentheses;
                let equals = self.equals_flag;
                quote! {
                    __builder.list(#sql, &self.#field, ::snowflake_sdk::sql::ListOptions {
                        quotes: #quotes,
                        separator: #separator,
                        parentheses: #parentheses,
                        must_parentheses: #must,
                        equals: #equals,
                    });
                }
            }
        }
    }
}

pub(crate) fn impl_to_sql(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = named_fields(ast)?;
    let mut clauses = Vec::with_capacity(fields.named.len());
    for field in fields.named.iter() {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("ddl")) {
            clauses.push(Ddl::from_attribute(attr)?.render(ident));
        }
    }

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::snowflake_sdk::sql::ToSql for #name #ty_generics #where_clause {
            fn write_sql(&self, __builder: &mut ::snowflake_sdk::sql::SqlBuilder) {
                #(#clauses)*
            }
        }
        impl #impl_generics ::snowflake_sdk::sql::SqlValue for #name #ty_generics #where_clause {
            fn write_value(&self, out: &mut ::std::string::String, _quotes: ::snowflake_sdk::sql::Quotes) {
                out.push_str(&::snowflake_sdk::sql::ToSql::to_sql(self));
            }
            fn write_items(
                &self,
                out: &mut ::std::string::String,
                separator: &str,
                _quotes: ::snowflake_sdk::sql::Quotes,
            ) {
                let mut __builder = ::snowflake_sdk::sql::SqlBuilder::default();
                ::snowflake_sdk::sql::ToSql::write_sql(self, &mut __builder);
                out.push_str(&__builder.into_clauses().join(separator));
            }
        }
    })
}
