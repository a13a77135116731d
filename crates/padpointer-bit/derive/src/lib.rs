mod derive;

use proc_macro::TokenStream;

use crate::derive::handle_derive_bit;

/// Derives `padpointer_bit_mask::Bitable` for a fieldless enum.
/// Variants get consecutive bits in declaration order.
#[proc_macro_derive(Bit)]
pub fn derive_bit(input: TokenStream) -> TokenStream {
    handle_derive_bit(input)
}
