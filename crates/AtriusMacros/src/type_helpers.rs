//=============================================================================
// Type Analysis Helper Functions
//=============================================================================

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{GenericArgument, Path, PathArguments, Type, TypePath};

/// FHIR primitive aliases and the `PrimitiveKind` variant each one maps to.
///
/// An alias name is also its variant name. Anything not listed is treated as
/// a composite type.
const KNOWN_ELEMENT_ALIASES: &[&str] = &[
    "Base64Binary",
    "Boolean",
    "Code",
    "Date",
    "DateTime",
    "Decimal",
    "Id",
    "Instant",
    "Integer",
    "Markdown",
    "Oid",
    "PositiveInt",
    "String",
    "Time",
    "UnsignedInt",
    "Uri",
    "Uuid",
    "Xhtml",
];

fn get_wrapped_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(TypePath {
                          path: Path { segments, .. },
                          ..
                      }) = ty
        && let Some(segment) = segments.last()
        && segment.ident == wrapper
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner_ty)) = args.args.first()
    {
        return Some(inner_ty);
    }
    None
}

/// Extracts the inner type from an `Option<T>` type.
///
/// ```rust,ignore
/// // For type: Option<Vec<HumanName>>
/// // Returns: Some(Vec<HumanName>)
/// ```
pub(crate) fn get_option_inner_type(ty: &Type) -> Option<&Type> {
    get_wrapped_type(ty, "Option")
}

/// Extracts the inner type from a `Vec<T>` type.
pub(crate) fn get_vec_inner_type(ty: &Type) -> Option<&Type> {
    get_wrapped_type(ty, "Vec")
}

/// Extracts the inner type from a `Box<T>` type.
///
/// Box types are used for cycle breaking in recursive data structures
/// (`Identifier.assigner` → `Reference.identifier` → `Identifier`).
pub(crate) fn get_box_inner_type(ty: &Type) -> Option<&Type> {
    get_wrapped_type(ty, "Box")
}

fn last_segment_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(TypePath { path, .. }) => {
            path.segments.last().map(|segment| segment.ident.to_string())
        }
        _ => None,
    }
}

/// How a struct field is laid out: `Option<T>` or `Option<Vec<T>>`.
pub(crate) struct FieldShape<'a> {
    pub repeated: bool,
    /// `T`, still wrapped in `Box` if the field is boxed
    pub inner: &'a Type,
}

/// Checks that a field type is `Option<T>` or `Option<Vec<T>>`.
pub(crate) fn analyze_field_type(ty: &Type) -> syn::Result<FieldShape<'_>> {
    let inner = get_option_inner_type(ty).ok_or_else(|| {
        syn::Error::new_spanned(ty, "FHIR fields must be `Option<T>` or `Option<Vec<T>>`")
    })?;
    Ok(match get_vec_inner_type(inner) {
        Some(element) => FieldShape {
            repeated: true,
            inner: element,
        },
        None => FieldShape {
            repeated: false,
            inner,
        },
    })
}

/// Builds the `ElementType` expression describing a field's element type.
///
/// Known primitive aliases become `ElementType::Primitive`; any other type is
/// a composite constructed through `new_boxed`.
pub(crate) fn element_type_tokens(ty: &Type) -> syn::Result<TokenStream> {
    let base = get_box_inner_type(ty).unwrap_or(ty);
    let name = last_segment_name(base)
        .ok_or_else(|| syn::Error::new_spanned(ty, "expected a FHIR type path"))?;
    if KNOWN_ELEMENT_ALIASES.contains(&name.as_str()) {
        let kind = format_ident!("{}", name);
        return Ok(quote! {
            ::atrius_fhir_lib::schema::ElementType::Primitive(
                ::atrius_fhir_lib::PrimitiveKind::#kind
            )
        });
    }
    Ok(quote! {
        ::atrius_fhir_lib::schema::ElementType::Composite {
            name: #name,
            new: ::atrius_fhir_lib::schema::new_boxed::<#base>,
        }
    })
}
