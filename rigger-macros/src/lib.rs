//! Proc-Macros implementations for the rigger dependency container
//!

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod construct;

/// Implements the `Construct` trait for a struct
///
/// The generated class takes one argument per field, in declaration order.
/// `Arc<T>` and `Value` fields receive the resolved instance itself,
/// every other field is cloned out of its argument.
/// Fields marked with `#[construct(default)]` are set to `Default::default()`
/// and do not take an argument.
///
/// # Example
/// ```ignore
/// use rigger::{Construct, Container, args, object_of, reference};
/// use std::sync::Arc;
///
/// #[derive(Construct)]
/// struct Service {
///     name: String,
///     logger: Arc<Logger>,
///     #[construct(default)]
///     items: Vec<String>,
/// }
///
/// // This expands to:
/// // impl Construct for Service {
/// //     fn class() -> Class<Self> {
/// //         Class::from_args(|args| Ok(Self {
/// //             name: args.take::<String>()?,
/// //             logger: args.read::<Arc<Logger>>()?,
/// //             items: Default::default(),
/// //         }))
/// //         .with_arity(2)
/// //     }
/// // }
///
/// container.add("service", object_of::<Service>().construct(args!["billing", reference("logger")]))?;
/// ```
#[proc_macro_derive(Construct, attributes(construct))]
pub fn derive_construct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    construct::expand_construct(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
