//! Implementation of the `#[derive(Tabular)]` macro.
//!
//! Generates the `roster::Tabular` impl and one field-name constant per
//! annotated field, so queries are built from `Student::LAST_NAME` rather
//! than string literals.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_table_attrs, FieldKind};

pub fn tabular_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Tabular can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Tabular can only be derived for structs",
            ))
        }
    };

    let mut match_arms: Vec<TokenStream> = Vec::new();
    let mut constants: Vec<TokenStream> = Vec::new();
    let mut names: Vec<String> = Vec::new();

    for field in fields {
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attr = parse_table_attrs(&field.attrs)?;
        let kind = match (attr.skip, attr.kind) {
            (false, Some(kind)) => kind,
            _ => continue,
        };

        let query_name = attr.rename.unwrap_or_else(|| field_ident.to_string());
        if names.contains(&query_name) {
            return Err(Error::new(
                field.span(),
                format!("duplicate table field name '{}'", query_name),
            ));
        }

        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        let doc = format!("Query name of the `{}` field.", field_ident);
        constants.push(quote! {
            #[doc = #doc]
            pub const #const_name: &'static str = #query_name;
        });

        let value_expr = if option_inner(&field.ty).is_some() {
            let present = value_of(kind, quote! { inner });
            quote! {
                match &self.#field_ident {
                    ::core::option::Option::Some(inner) => #present,
                    ::core::option::Option::None => ::roster::Value::None,
                }
            }
        } else {
            value_of(kind, quote! { &self.#field_ident })
        };

        match_arms.push(quote! { #query_name => #value_expr, });
        names.push(query_name);
    }

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*
        }

        impl #impl_generics ::roster::Tabular for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::roster::Value<'_> {
                match field {
                    #(#match_arms)*
                    _ => ::roster::Value::None,
                }
            }

            fn fields() -> &'static [&'static str] {
                &[#(#names),*]
            }
        }
    })
}

/// Builds the `Value` for a field given an expression of type `&FieldType`.
fn value_of(kind: FieldKind, place: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! {
            ::roster::Value::String(::core::convert::AsRef::<str>::as_ref(#place))
        },
        FieldKind::Number => quote! {
            ::roster::Value::Number(::roster::Number::from(*#place))
        },
        FieldKind::Bool => quote! { ::roster::Value::Bool(*#place) },
        FieldKind::Label => quote! {
            ::roster::Value::String(::roster::TableLabel::label(#place))
        },
    }
}

/// Returns `T` if `ty` is written as `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first()? {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// `firstName` and `first_name` both become `FIRST_NAME`.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphabetic();
        }
    }

    result
}
