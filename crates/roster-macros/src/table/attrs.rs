//! Parsing of `#[table(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Ident, Lit, Meta, Result, Token,
};

/// How a field is exposed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `&str`-like field, exposed as `Value::String`.
    String,
    /// Numeric field convertible into `Number`.
    Number,
    /// `bool` field.
    Bool,
    /// Field implementing `TableLabel`, exposed as its label string.
    Label,
}

impl FieldKind {
    fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "String" | "string" | "Date" | "date" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Bool" | "bool" | "boolean" => Ok(FieldKind::Bool),
            "Label" | "label" => Ok(FieldKind::Label),
            other => Err(Error::new(
                ident.span(),
                format!(
                    "unknown table field kind: '{}'. Expected one of: String, Number, Bool, Label",
                    other
                ),
            )),
        }
    }
}

/// Field-level options from `#[table(...)]`.
#[derive(Debug, Clone)]
pub struct TableAttr {
    pub kind: Option<FieldKind>,
    pub skip: bool,
    /// Field name used in queries (default: the Rust field name).
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for TableAttr {
    fn default() -> Self {
        TableAttr {
            kind: None,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for TableAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = TableAttr::default();
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => attr.skip = true,
                Meta::Path(path) => {
                    let ident = path.get_ident().ok_or_else(|| {
                        Error::new(path.span(), "expected String, Number, Bool, Label or skip")
                    })?;
                    if attr.kind.is_some() {
                        return Err(Error::new(ident.span(), "field kind given twice"));
                    }
                    attr.kind = Some(FieldKind::from_ident(ident)?);
                    attr.span = ident.span();
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => match &nv.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => attr.rename = Some(s.value()),
                    other => {
                        return Err(Error::new(other.span(), "rename must be a string literal"))
                    }
                },
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown table attribute. Expected: String, Number, Bool, Label, skip, or rename = \"...\"",
                    ))
                }
            }
        }

        if attr.skip && attr.kind.is_some() {
            return Err(Error::new(attr.span, "skip cannot be combined with a field kind"));
        }

        Ok(attr)
    }
}

/// Reads the `#[table(...)]` attribute of a field, if any.
pub fn parse_table_attrs(attrs: &[Attribute]) -> Result<TableAttr> {
    match attrs.iter().find(|attr| attr.path().is_ident("table")) {
        Some(attr) => attr.parse_args::<TableAttr>(),
        None => Ok(TableAttr::default()),
    }
}
