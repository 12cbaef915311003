use heck::ToLowerCamelCase;
use syn::punctuated::Punctuated;
use syn::{token, Attribute, Lit, Meta};

/// Returns the `rename = "..."` value of a `#[fhir_serde(...)]` attribute, if any.
fn get_rename(attrs: &[Attribute]) -> Option<String> {
    for attr in attrs {
        if attr.path().is_ident("fhir_serde")
            && let Ok(list) =
            attr.parse_args_with(Punctuated::<Meta, token::Comma>::parse_terminated)
        {
            for meta in list {
                if let Meta::NameValue(nv) = meta
                    && nv.path.is_ident("rename")
                    && let syn::Expr::Lit(expr_lit) = nv.value
                    && let Lit::Str(lit_str) = expr_lit.lit
                {
                    return Some(lit_str.value());
                }
            }
        }
    }
    None
}

/// Determines the JSON key of a struct field.
///
/// # Attribute Processing
///
/// - If `#[fhir_serde(rename = "customName")]` is present, uses the custom name
/// - Otherwise, converts the Rust field name from `snake_case` to `camelCase`
///
/// For choice fields this is the base key; the alternative's suffix is added
/// at runtime.
///
/// # Examples
///
/// ```rust,ignore
/// // Field: pub implicit_rules: Option<Uri>
/// // Result: "implicitRules" (camelCase conversion)
///
/// // Field: #[fhir_serde(rename = "modifierExtension")]
/// //        pub modifier_extension: Option<Vec<Extension>>
/// // Result: "modifierExtension" (explicit rename)
/// ```
pub(crate) fn get_effective_field_name(field: &syn::Field) -> syn::Result<String> {
    if let Some(rename) = get_rename(&field.attrs) {
        return Ok(rename);
    }
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "FHIR fields must be named"))?;
    // raw identifiers such as `r#type` keep their FHIR spelling
    let name = ident.to_string();
    Ok(name.trim_start_matches("r#").to_lower_camel_case())
}

/// Determines the type-name suffix of a choice alternative.
///
/// Uses `#[fhir_serde(rename = "...")]` when present, otherwise the variant
/// name as written (already PascalCase): `Boolean(Boolean)` → `Boolean`.
pub(crate) fn get_variant_suffix(variant: &syn::Variant) -> String {
    get_rename(&variant.attrs).unwrap_or_else(|| variant.ident.to_string())
}

/// Checks if a field is a choice field.
///
/// Choice fields carry `#[fhir_serde(flatten)]`: their value is written straight
/// into the parent object under a suffixed key rather than as a nested object.
///
/// # Examples
///
/// ```rust,ignore
/// // Regular field
/// pub active: Option<Boolean>,  // false
///
/// // Choice field
/// #[fhir_serde(flatten)]
/// pub deceased: Option<PatientDeceased>,  // true
/// ```
pub(crate) fn is_flattened(field: &syn::Field) -> bool {
    for attr in &field.attrs {
        if attr.path().is_ident("fhir_serde")
            && let Ok(list) =
            attr.parse_args_with(Punctuated::<Meta, token::Comma>::parse_terminated)
        {
            for meta in list {
                if let Meta::Path(path) = meta
                    && path.is_ident("flatten")
                {
                    return true;
                }
            }
        }
    }
    false
}

/// Checks for the `#[fhir_resource]` marker on a struct.
pub(crate) fn is_resource(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident("fhir_resource"))
}
