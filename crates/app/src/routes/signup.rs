use crate::routes::Route;
use dioxus::prelude::*;

#[component]
pub fn Signup() -> Element {
    rsx! {
        div { class: "auth-page",
            h1 { "Create your account" }
            p { "Accounts are created with the identity provider. Sign in once yours is ready." }
            Link { to: Route::Login {}, "Go to sign in" }
        }
    }
}
