use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemFn};

/// Marks a synchronous test and installs a `tracing` test writer before the
/// body runs.
///
/// The subscriber honours `RUST_LOG`, so `RUST_LOG=rxflux=trace cargo test`
/// shows connect/cancel events of the stream engine next to the failing test.
/// Installation is best effort: the first test on a thread wins, later ones
/// reuse it.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);

  let raw_args = proc_macro2::TokenStream::from(attr);
  if !raw_args.is_empty() {
    return TokenStream::from(
      syn::Error::new(raw_args.span(), "rxflux_macro::test does not take any arguments")
        .to_compile_error(),
    );
  }

  if let Some(asyncness) = input.sig.asyncness {
    return TokenStream::from(
      syn::Error::new(
        asyncness.span(),
        "rxflux_macro::test only supports synchronous tests: streams run on the subscribing \
         thread, there is no runtime to drive an async test",
      )
      .to_compile_error(),
    );
  }

  let ItemFn { attrs, vis, sig, block } = input;

  let expanded = quote! {
      #[test]
      #(#attrs)*
      #vis #sig {
        let _ = ::tracing_subscriber::fmt()
          .with_env_filter(::tracing_subscriber::EnvFilter::from_default_env())
          .with_test_writer()
          .try_init();
        #block
      }
  };

  TokenStream::from(expanded)
}
