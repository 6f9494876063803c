//! Proc-macro attribute for generating backtrace-style `Debug` impls on
//! `snafu`-derived error enums.
//!
//! Applying `#[stack_trace_debug]` above `#[derive(Snafu)]` replaces the
//! derived `Debug` output with one that walks the `source()` chain, so a
//! top-level error prints its own message followed by a numbered list of
//! the errors that caused it. This is what gets logged by `tracing::error!`
//! call sites across the workspace instead of the default one-line enum
//! debug dump.

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;
use syn::parse_macro_input;

#[proc_macro_attribute]
pub fn stack_trace_debug(_args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    let expanded = quote! {
        #item

        impl #impl_generics ::std::fmt::Debug for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{self}")?;

                let mut cause = ::std::error::Error::source(self);
                if cause.is_some() {
                    writeln!(f)?;
                    write!(f, "Caused by:")?;
                }

                let mut n = 0usize;
                while let Some(err) = cause {
                    writeln!(f)?;
                    write!(f, "{n:>4}: {err}")?;
                    n += 1;
                    cause = err.source();
                }

                Ok(())
            }
        }
    };

    expanded.into()
}
