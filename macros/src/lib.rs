//! Derive macros for tasklist action enums
//!
//! `#[derive(Action)]` classifies the variants of an action enum into
//! commands (intent) and events (facts) and generates small helpers the
//! reducer and the logs rely on.
//!
//! # Example
//!
//! ```ignore
//! use tasklist_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TaskAction {
//!     #[command]
//!     AddTask { text: String },
//!
//!     #[event]
//!     TaskAdded { id: u64, text: String },
//! }
//!
//! let add = TaskAction::AddTask { text: "milk".into() };
//! assert!(add.is_command());
//! assert_eq!(add.name(), "AddTask");
//! assert_eq!(add.event_type(), None);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, parse_macro_input};

/// How a variant was marked
#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Command,
    Event,
    Plain,
}

/// Derive macro for action enums
///
/// Generates on the enum:
/// - `name()` - the variant name, for logging
/// - `is_command()` - true for variants marked `#[command]`
/// - `is_event()` - true for variants marked `#[event]`
/// - `event_type()` - `Some("<Variant>.v1")` for events, `None` otherwise
///
/// Unmarked variants are neither commands nor events.
///
/// # Errors
///
/// Emits a compile error if applied to anything but an enum, or if a
/// variant carries both `#[command]` and `#[event]`.
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_action(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let mut name_arms = Vec::new();
    let mut command_arms = Vec::new();
    let mut event_arms = Vec::new();
    let mut event_type_arms = Vec::new();

    for variant in &data_enum.variants {
        let kind = match (
            has_attribute(&variant.attrs, "command"),
            has_attribute(&variant.attrs, "event"),
        ) {
            (true, true) => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "Variant cannot be both #[command] and #[event]",
                ));
            }
            (true, false) => Kind::Command,
            (false, true) => Kind::Event,
            (false, false) => Kind::Plain,
        };

        let pattern = variant_pattern(&variant.ident, &variant.fields);
        let label = variant.ident.to_string();
        name_arms.push(quote! { #pattern => #label, });

        match kind {
            Kind::Command => command_arms.push(quote! { #pattern => true, }),
            Kind::Event => {
                let event_type = format!("{label}.v1");
                event_arms.push(quote! { #pattern => true, });
                event_type_arms.push(quote! { #pattern => ::core::option::Option::Some(#event_type), });
            }
            Kind::Plain => {}
        }
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns the variant name
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }

            /// Returns true if this action is a command
            #[must_use]
            #[allow(unreachable_patterns, clippy::match_like_matches_macro)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns, clippy::match_like_matches_macro)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#event_arms)*
                    _ => false,
                }
            }

            /// Returns the versioned event type name, or `None` for non-events
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn event_type(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#event_type_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// Builds a pattern matching any value of the variant
fn variant_pattern(variant: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(_) => quote! { Self::#variant { .. } },
        Fields::Unnamed(_) => quote! { Self::#variant(..) },
        Fields::Unit => quote! { Self::#variant },
    }
}

fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
