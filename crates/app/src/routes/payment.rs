use crate::routes::Route;
use dioxus::prelude::*;

/// Plan selection for accounts without an active tier. The payment
/// processor returns here with `?success=true` once checkout completes.
#[component]
pub fn Payment(success: Option<String>) -> Element {
    rsx! {
        div { class: "payment-page",
            h1 { "Choose a plan" }
            if success.is_some() {
                p { "Finishing your checkout..." }
            } else {
                p { "Your account needs an active plan before you can continue." }
            }
            Link { to: Route::Account { success: None }, "Back to account" }
        }
    }
}
