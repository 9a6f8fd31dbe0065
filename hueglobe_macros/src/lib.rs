use proc_macro::TokenStream;
use quote::quote;

/// Generates a `main` that installs a `tracing` subscriber and runs the preset.
///
/// The type has to implement `Default` and `hueglobe::HueGlobePreset`. Logging defaults to
/// `info` and follows `RUST_LOG` when it is set.
#[proc_macro_derive(HueGlobeApp)]
pub fn hueglobe_app(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    let app_name = &input.ident;

    quote! {
        fn main() {
            let filter = ::hueglobe::tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| ::hueglobe::tracing_subscriber::EnvFilter::new("info"));
            ::hueglobe::tracing_subscriber::fmt()
                .with_env_filter(filter)
                .init();

            let app = ::hueglobe::HueGlobePreset::settings(#app_name::default());

            if let Err(e) = ::hueglobe::AppSettings::run(app) {
                ::hueglobe::tracing::error!("{e}");
            }
        }
    }
    .into()
}
