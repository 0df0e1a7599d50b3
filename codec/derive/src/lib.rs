//! Derive positional binary codecs for plain structs.
//!
//! `#[derive(Record)]` enumerates a struct's fields in declaration order and generates the
//! `Write`, `EncodeSize`, `Read`, `Describe` and `Record` implementations of `packwire-codec`.
//! Named, tuple and unit structs are supported, including generic ones (every type parameter is
//! bounded by `packwire_codec::Codec`).
//!
//! Enums and unions are rejected at compile time. A field whose type has no codec (raw pointers,
//! references, trait objects, shared-ownership pointers) fails to compile at the generated
//! implementation, never at a later runtime call.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote, ToTokens};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Generics, Ident, Index, Type};

/// Derives the codec and schema implementations for a struct.
///
/// ```ignore
/// use packwire_codec::Record;
///
/// #[derive(Record)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
/// ```
#[proc_macro_derive(Record)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// A struct member as seen by the generated code.
struct Member<'a> {
    /// How the member is accessed on `self` (`a` or `0`).
    access: TokenStream2,
    /// The name recorded in the schema.
    name: String,
    /// Local binding used while reading.
    binding: Ident,
    ty: &'a Type,
}

fn expand_record(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data_struct) => &data_struct.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "enums are not supported: records must be structs",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "unions are not supported: records must be structs",
            ))
        }
    };

    let members = collect_members(fields);
    let construct = construct_self(fields, &members);
    let generics = add_codec_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let writes = members.iter().map(|member| {
        let access = &member.access;
        quote! {
            ::packwire_codec::Write::write(&self.#access, buf);
        }
    });

    let sizes = members.iter().map(|member| {
        let access = &member.access;
        quote! {
            + ::packwire_codec::EncodeSize::encode_size(&self.#access)
        }
    });

    let min_sizes = members.iter().map(|member| {
        let ty = member.ty;
        quote! {
            + <#ty as ::packwire_codec::Read>::MIN_SIZE
        }
    });

    let reads = members.iter().map(|member| {
        let ty = member.ty;
        let binding = &member.binding;
        quote! {
            let #binding = <#ty as ::packwire_codec::Read>::read_cfg(buf, cfg)?;
        }
    });

    let schema_fields = members.iter().map(|member| {
        let ty = member.ty;
        let field_name = &member.name;
        quote! {
            ::packwire_codec::schema::Field {
                name: #field_name,
                kind: <#ty as ::packwire_codec::schema::Describe>::KIND,
            }
        }
    });

    let name_str = name.to_string();

    Ok(quote! {
        impl #impl_generics ::packwire_codec::Write for #name #ty_generics #where_clause {
            #[inline]
            #[allow(unused_variables)]
            fn write(&self, buf: &mut impl ::packwire_codec::__private::BufMut) {
                #(#writes)*
            }
        }

        impl #impl_generics ::packwire_codec::EncodeSize for #name #ty_generics #where_clause {
            #[inline]
            fn encode_size(&self) -> usize {
                0 #(#sizes)*
            }
        }

        impl #impl_generics ::packwire_codec::Read for #name #ty_generics #where_clause {
            const MIN_SIZE: usize = 0 #(#min_sizes)*;

            #[inline]
            #[allow(unused_variables)]
            fn read_cfg(
                buf: &mut impl ::packwire_codec::__private::Buf,
                cfg: &::packwire_codec::Config,
            ) -> ::core::result::Result<Self, ::packwire_codec::Error> {
                #(#reads)*
                ::core::result::Result::Ok(#construct)
            }
        }

        impl #impl_generics ::packwire_codec::schema::Describe for #name #ty_generics #where_clause {
            const KIND: ::packwire_codec::schema::Kind = ::packwire_codec::schema::Kind::Record {
                schema: &<Self as ::packwire_codec::schema::Record>::SCHEMA,
            };
        }

        impl #impl_generics ::packwire_codec::schema::Record for #name #ty_generics #where_clause {
            const SCHEMA: ::packwire_codec::schema::Schema = ::packwire_codec::schema::Schema {
                name: #name_str,
                fields: &[ #(#schema_fields),* ],
            };
        }
    })
}

fn collect_members(fields: &Fields) -> Vec<Member<'_>> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .enumerate()
            .filter_map(|(i, field)| {
                let ident = field.ident.as_ref()?;
                Some(Member {
                    access: ident.to_token_stream(),
                    name: ident.to_string(),
                    binding: format_ident!("__field_{}", i),
                    ty: &field.ty,
                })
            })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, field)| Member {
                access: Index::from(i).to_token_stream(),
                name: i.to_string(),
                binding: format_ident!("__field_{}", i),
                ty: &field.ty,
            })
            .collect(),
        Fields::Unit => Vec::new(),
    }
}

/// Builds the `Self { .. }` / `Self(..)` / `Self` expression from the read bindings.
fn construct_self(fields: &Fields, members: &[Member<'_>]) -> TokenStream2 {
    match fields {
        Fields::Named(_) => {
            let assignments = members.iter().map(|member| {
                let access = &member.access;
                let binding = &member.binding;
                quote! { #access: #binding }
            });
            quote! { Self { #(#assignments),* } }
        }
        Fields::Unnamed(_) => {
            let bindings = members.iter().map(|member| &member.binding);
            quote! { Self( #(#bindings),* ) }
        }
        Fields::Unit => quote! { Self },
    }
}

/// Bounds every type parameter by `packwire_codec::Codec`.
fn add_codec_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param
            .bounds
            .push(syn::parse_quote!(::packwire_codec::Codec));
    }
    generics
}
