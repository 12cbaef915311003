use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, Fields, Ident};

use crate::field_helpers::get_variant_suffix;
use crate::type_helpers::element_type_tokens;

/// Generates `ChoiceType` for a choice enum.
///
/// Each variant must wrap exactly one value; the variant name (or its
/// `rename`) is the JSON key suffix of that alternative.
pub(crate) fn generate_choice_impl(name: &Ident, data: &DataEnum) -> syn::Result<TokenStream> {
    let choice_name = name.to_string();
    let mut alternatives = Vec::new();
    let mut active_arms = Vec::new();
    let mut build_arms = Vec::new();

    for variant in &data.variants {
        let ident = &variant.ident;
        let ty = match &variant.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
            _ => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "choice alternatives must wrap exactly one value",
                ));
            }
        };
        let suffix = get_variant_suffix(variant);
        let element_type = element_type_tokens(ty)?;

        alternatives.push(quote! {
            ::atrius_fhir_lib::schema::Alternative {
                name: #suffix,
                ty: #element_type,
            }
        });
        active_arms.push(quote! {
            Self::#ident(value) => (#suffix, ::atrius_fhir_lib::schema::AsDatum::as_datum(value)),
        });
        build_arms.push(quote! {
            #suffix => Ok(Self::#ident(::atrius_fhir_lib::schema::FromDatum::from_datum(datum)?)),
        });
    }

    Ok(quote! {
        impl ::atrius_fhir_lib::schema::ChoiceType for #name {
            const ALTERNATIVES: &'static [::atrius_fhir_lib::schema::Alternative] =
                &[#(#alternatives),*];

            fn active_variant(&self) -> (&'static str, ::atrius_fhir_lib::schema::DatumRef<'_>) {
                match self {
                    #(#active_arms)*
                }
            }

            fn from_variant(
                variant: &str,
                datum: ::atrius_fhir_lib::schema::Datum,
            ) -> ::std::result::Result<Self, ::atrius_fhir_lib::schema::SchemaError> {
                match variant {
                    #(#build_arms)*
                    other => Err(::atrius_fhir_lib::schema::SchemaError::UnknownVariant {
                        choice: #choice_name,
                        variant: other.to_string(),
                    }),
                }
            }
        }
    })
}
