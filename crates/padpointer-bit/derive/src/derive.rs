use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

const MAX_VARIANTS: usize = 64;

pub fn handle_derive_bit(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let variants: Vec<syn::Ident> = match input.data {
        Data::Enum(e) => {
            let mut idents = Vec::with_capacity(e.variants.len());
            for v in e.variants {
                if !matches!(v.fields, Fields::Unit) {
                    return syn::Error::new_spanned(
                        v.ident,
                        "Bit supports only fieldless enum variants",
                    )
                    .to_compile_error()
                    .into();
                }
                idents.push(v.ident);
            }
            idents
        }
        _ => {
            return syn::Error::new_spanned(name, "Bit can be derived only for enums")
                .to_compile_error()
                .into();
        }
    };

    if variants.len() > MAX_VARIANTS {
        return syn::Error::new_spanned(
            name,
            format!("Bit supports at most {MAX_VARIANTS} variants"),
        )
        .to_compile_error()
        .into();
    }

    // Bits follow declaration order, independent of explicit discriminants.
    let bit_arms = variants.iter().enumerate().map(|(i, v)| {
        let idx = i as u64;
        quote! { #name::#v => 1u64 << #idx }
    });
    let index_arms = variants.iter().enumerate().map(|(i, v)| {
        let idx = i as u32;
        quote! { #name::#v => #idx }
    });

    let expanded = quote! {
        impl ::padpointer_bit_mask::Bitable for #name {
            #[inline]
            fn bit(&self) -> u64 {
                match self { #( #bit_arms, )* }
            }

            #[inline]
            fn index(&self) -> u32 {
                match self { #( #index_arms, )* }
            }
        }
    };

    TokenStream::from(expanded)
}
