use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DataStruct, Fields, Ident};

use crate::field_helpers::{get_effective_field_name, is_flattened, is_resource};
use crate::type_helpers::{analyze_field_type, element_type_tokens};

/// Generates the schema table and field accessors for a composite struct.
///
/// Produces impls of `Described`, `Composite`, `AsDatum` and `FromDatum`.
/// Every field becomes one `FieldDescriptor` in declaration order and one arm
/// in each of `field` / `set_field`, keyed by its JSON name.
pub(crate) fn generate_composite_impl(
    name: &Ident,
    data: &DataStruct,
    attrs: &[Attribute],
) -> syn::Result<TokenStream> {
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            name,
            "FhirComposite requires a struct with named fields",
        ));
    };
    let type_name = name.to_string();
    let resource = is_resource(attrs);

    let mut descriptors = Vec::new();
    let mut getters = Vec::new();
    let mut setters = Vec::new();

    for field in &named.named {
        let ident = &field.ident;
        let json_key = get_effective_field_name(field)?;
        let shape = analyze_field_type(&field.ty)?;

        if is_flattened(field) {
            if shape.repeated {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "choice fields cannot be repeated",
                ));
            }
            let choice = shape.inner;
            descriptors.push(quote! {
                ::atrius_fhir_lib::schema::FieldDescriptor {
                    json_key: #json_key,
                    repeated: false,
                    ty: ::atrius_fhir_lib::schema::FieldType::Choice(
                        <#choice as ::atrius_fhir_lib::schema::ChoiceType>::ALTERNATIVES
                    ),
                }
            });
            getters.push(quote! {
                #json_key => ::atrius_fhir_lib::schema::FieldRef::from_choice(&self.#ident),
            });
            setters.push(quote! {
                #json_key => self.#ident = Some(value.into_choice(json_key)?),
            });
            continue;
        }

        let element_type = element_type_tokens(shape.inner)?;
        let repeated = shape.repeated;
        descriptors.push(quote! {
            ::atrius_fhir_lib::schema::FieldDescriptor {
                json_key: #json_key,
                repeated: #repeated,
                ty: ::atrius_fhir_lib::schema::FieldType::Element(#element_type),
            }
        });
        if repeated {
            getters.push(quote! {
                #json_key => ::atrius_fhir_lib::schema::FieldRef::from_repeated(&self.#ident),
            });
            setters.push(quote! {
                #json_key => self.#ident = Some(value.into_repeated(json_key)?),
            });
        } else {
            getters.push(quote! {
                #json_key => ::atrius_fhir_lib::schema::FieldRef::from_option(&self.#ident),
            });
            setters.push(quote! {
                #json_key => self.#ident = Some(value.into_single(json_key)?),
            });
        }
    }

    Ok(quote! {
        impl ::atrius_fhir_lib::schema::Described for #name {
            fn type_schema() -> &'static ::atrius_fhir_lib::schema::TypeSchema {
                static SCHEMA: ::atrius_fhir_lib::schema::TypeSchema =
                    ::atrius_fhir_lib::schema::TypeSchema {
                        name: #type_name,
                        resource: #resource,
                        fields: &[#(#descriptors),*],
                    };
                &SCHEMA
            }
        }

        impl ::atrius_fhir_lib::schema::Composite for #name {
            fn schema(&self) -> &'static ::atrius_fhir_lib::schema::TypeSchema {
                <Self as ::atrius_fhir_lib::schema::Described>::type_schema()
            }

            fn field(&self, json_key: &str) -> ::atrius_fhir_lib::schema::FieldRef<'_> {
                match json_key {
                    #(#getters)*
                    _ => ::atrius_fhir_lib::schema::FieldRef::Absent,
                }
            }

            fn set_field(
                &mut self,
                json_key: &str,
                value: ::atrius_fhir_lib::schema::FieldValue,
            ) -> ::std::result::Result<(), ::atrius_fhir_lib::schema::SchemaError> {
                match json_key {
                    #(#setters)*
                    _ => {
                        return Err(::atrius_fhir_lib::schema::SchemaError::UnknownField {
                            type_name: #type_name,
                            field: json_key.to_string(),
                        });
                    }
                }
                Ok(())
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn ::std::any::Any> {
                self
            }
        }

        impl ::atrius_fhir_lib::schema::AsDatum for #name {
            fn as_datum(&self) -> ::atrius_fhir_lib::schema::DatumRef<'_> {
                ::atrius_fhir_lib::schema::DatumRef::Composite(self)
            }
        }

        impl ::atrius_fhir_lib::schema::FromDatum for #name {
            fn from_datum(
                datum: ::atrius_fhir_lib::schema::Datum,
            ) -> ::std::result::Result<Self, ::atrius_fhir_lib::schema::SchemaError> {
                datum.into_composite::<Self>()
            }
        }
    })
}
