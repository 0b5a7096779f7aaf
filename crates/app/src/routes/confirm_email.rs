use crate::routes::Route;
use dioxus::prelude::*;

/// Shown while the signed-in user's email address is unverified.
#[component]
pub fn ConfirmEmail() -> Element {
    rsx! {
        div { class: "auth-page",
            h1 { "Confirm your email" }
            p { "We sent a confirmation link to your inbox. Follow it, then continue." }
            Link { to: Route::Account { success: None }, "I've confirmed my email" }
        }
    }
}
