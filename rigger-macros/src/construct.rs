//! Macros for constructible types

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Type};

/// How a single field gets its value
enum FieldSource {
    /// Shared instance read from the argument
    Shared,
    /// Cloned out of the argument
    Cloned,
    /// `Default::default()`, no argument consumed
    Default,
}

impl FieldSource {
    fn of(field: &Field) -> syn::Result<Self> {
        let mut source = None;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("construct")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    source = Some(FieldSource::Default);
                    Ok(())
                } else {
                    Err(meta.error("unsupported construct attribute, expected `default`"))
                }
            })?;
        }

        Ok(source.unwrap_or_else(|| if is_shared(&field.ty) {
            FieldSource::Shared
        } else {
            FieldSource::Cloned
        }))
    }

    fn takes_arg(&self) -> bool {
        !matches!(self, FieldSource::Default)
    }

    fn expand(&self, ty: &Type) -> TokenStream {
        match self {
            FieldSource::Shared => quote! { args.read::<#ty>()? },
            FieldSource::Cloned => quote! { args.take::<#ty>()? },
            FieldSource::Default => quote! { ::core::default::Default::default() },
        }
    }
}

/// `Arc<T>` and `Value` keep the identity of the resolved instance
fn is_shared(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.path.segments
        .last()
        .is_some_and(|segment| segment.ident == "Arc" || segment.ident == "Value")
}

/// Creates a derive-macro for a constructible struct
pub(super) fn expand_construct(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Construct can only be derived for structs",
        ));
    };

    let mut arity = 0usize;
    let mut values = Vec::with_capacity(data.fields.len());
    for field in &data.fields {
        let source = FieldSource::of(field)?;
        if source.takes_arg() {
            arity += 1;
        }
        values.push(source.expand(&field.ty));
    }

    let body = match &data.fields {
        Fields::Named(fields) => {
            let names = fields.named.iter().map(|field| &field.ident);
            quote! { Self { #(#names: #values),* } }
        },
        Fields::Unnamed(_) => quote! { Self(#(#values),*) },
        Fields::Unit => quote! { Self },
    };

    let args = if arity == 0 { quote! { _ } } else { quote! { args } };
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::rigger::Construct for #name #ty_generics #where_clause {
            fn class() -> ::rigger::Class<Self> {
                ::rigger::Class::from_args(|#args: &mut ::rigger::Args| {
                    ::core::result::Result::Ok(#body)
                })
                .with_arity(#arity)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> String {
        expand_construct(&input).unwrap().to_string()
    }

    #[test]
    fn it_expands_named_fields_in_order() {
        let output = expand(parse_quote! {
            struct Foo {
                name: String,
                bar: Arc<Bar>,
            }
        });

        let name = output.find("args . take :: < String >").unwrap();
        let bar = output.find("args . read :: < Arc < Bar > >").unwrap();

        assert!(name < bar);
        assert!(output.contains("with_arity (2usize)"));
    }

    #[test]
    fn it_expands_tuple_struct() {
        let output = expand(parse_quote! {
            struct Port(u16);
        });

        assert!(output.contains("Self (args . take :: < u16 > () ?)"));
        assert!(output.contains("with_arity (1usize)"));
    }

    #[test]
    fn it_expands_unit_struct() {
        let output = expand(parse_quote! {
            struct Marker;
        });

        assert!(output.contains("Ok (Self)"));
        assert!(output.contains("with_arity (0usize)"));
    }

    #[test]
    fn it_skips_default_fields() {
        let output = expand(parse_quote! {
            struct Foo {
                name: String,
                #[construct(default)]
                items: Vec<String>,
            }
        });

        assert!(output.contains("items : :: core :: default :: Default :: default ()"));
        assert!(output.contains("with_arity (1usize)"));
    }

    #[test]
    fn it_fails_on_enum() {
        let input: DeriveInput = parse_quote! {
            enum Foo { A, B }
        };

        let err = expand_construct(&input).unwrap_err();

        assert_eq!(err.to_string(), "Construct can only be derived for structs");
    }

    #[test]
    fn it_fails_on_unknown_attribute() {
        let input: DeriveInput = parse_quote! {
            struct Foo {
                #[construct(skip)]
                name: String,
            }
        };

        assert!(expand_construct(&input).is_err());
    }
}
