//! # FHIR Macro - Procedural Macros for the FHIR Schema Registry
//!
//! This crate provides the derives that turn plain Rust structs and enums into
//! entries of the FHIR schema registry used by the JSON codec. Nothing is
//! discovered at runtime: every type gets a static descriptor table and a pair
//! of accessors generated at compile time.
//!
//! ## Overview
//!
//! - **`#[derive(FhirComposite)]`** - for complex types and resources. Generates
//!   `Described`, `Composite`, `AsDatum` and `FromDatum`.
//! - **`#[derive(FhirChoice)]`** - for `[x]` choice enums. Generates `ChoiceType`.
//!
//! ## FHIR JSON Patterns Covered
//!
//! ### Extension Pattern
//!
//! FHIR primitives can have associated metadata stored in a parallel `_fieldName` object:
//!
//! ```json
//! {
//!   "status": "active",
//!   "_status": {
//!     "id": "status-1",
//!     "extension": [...]
//!   }
//! }
//! ```
//!
//! Fields whose type is a known primitive alias (`Boolean`, `String`, `Code`,
//! ...) are described as primitives, which is what lets the codec emit and
//! read that companion.
//!
//! ### Choice Types
//!
//! FHIR's `[x]` fields are serialized as single key-value pairs with type suffixes:
//!
//! ```json
//! { "valueQuantity": {...} }  // for Quantity type
//! { "valueString": "text" }   // for String type
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use atrius_macros::{FhirChoice, FhirComposite};
//!
//! #[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
//! #[fhir_resource]
//! pub struct Patient {
//!     pub id: Option<Id>,
//!     #[fhir_serde(rename = "implicitRules")]
//!     pub implicit_rules: Option<Uri>,
//!     pub active: Option<Boolean>,  // Element<bool, Extension>
//!     pub name: Option<Vec<HumanName>>,
//!     #[fhir_serde(flatten)]
//!     pub deceased: Option<PatientDeceased>,
//! }
//!
//! #[derive(Debug, Clone, PartialEq, FhirChoice)]
//! pub enum PatientDeceased {
//!     Boolean(Boolean),
//!     DateTime(DateTime),
//! }
//! ```

extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput};

use crate::choice_impl::generate_choice_impl;
use crate::composite_impl::generate_composite_impl;

pub(crate) mod field_helpers;
pub(crate) mod type_helpers;
pub(crate) mod composite_impl;
pub(crate) mod choice_impl;

/// Derives the schema registry traits for a FHIR complex type or resource.
///
/// # Supported Attributes
///
/// - `#[fhir_resource]` on the struct - marks a resource; the codec writes and
///   checks `resourceType` for it
/// - `#[fhir_serde(rename = "name")]` - sets the JSON key (default: camelCase
///   of the field name)
/// - `#[fhir_serde(flatten)]` - marks a choice field; the field type must be
///   `Option<E>` with `E: FhirChoice`
///
/// # Field Types
///
/// Every field is `Option<T>` (0..1) or `Option<Vec<T>>` (0..*). `T` may be
/// boxed to break recursion. Primitive aliases are recognised by name; every
/// other `T` must itself derive `FhirComposite` and implement `Default`.
#[proc_macro_derive(FhirComposite, attributes(fhir_serde, fhir_resource))]
pub fn fhir_composite_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = match &input.data {
        Data::Struct(data) => generate_composite_impl(&input.ident, data, &input.attrs),
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "FhirComposite can only be derived for structs",
        )),
    };
    expanded
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `ChoiceType` for an enum representing a FHIR `[x]` field.
///
/// Each variant wraps one alternative. The variant name is the JSON key suffix
/// unless `#[fhir_serde(rename = "...")]` overrides it.
#[proc_macro_derive(FhirChoice, attributes(fhir_serde))]
pub fn fhir_choice_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = match &input.data {
        Data::Enum(data) => generate_choice_impl(&input.ident, data),
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "FhirChoice can only be derived for enums",
        )),
    };
    expanded
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
