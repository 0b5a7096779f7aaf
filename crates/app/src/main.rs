use dioxus::prelude::*;
use guard::IdentityProvider;

mod auth;
mod routes;
use auth::AuthState;
use routes::Route;

fn main() {
    guard::config::load_config();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let auth = use_context_provider(|| AuthState::new(guard::config::config()));

    // No stored session to restore: settle the provider as signed out so the
    // first navigation doesn't wait out the identity timeout.
    use_hook(move || {
        if auth.provider.current_credential().is_none() {
            auth.provider.sign_out();
        }
    });

    rsx! {
        Router::<Route> {}
    }
}
