use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;

#[component]
pub fn Account(success: Option<String>) -> Element {
    let auth = use_auth();
    let paid = success.as_deref() == Some("true");

    let handle_sign_out = move |_| {
        auth.sign_out();
        navigator().push(Route::Home {});
    };

    rsx! {
        div { class: "account-page",
            h1 { "Your account" }
            if paid {
                p { class: "account-banner", "Payment received. Your plan is active." }
            }
            nav {
                Link { to: Route::PrimarySettings {}, "Settings" }
            }
            button { onclick: handle_sign_out, "Sign out" }
        }
    }
}

#[component]
pub fn PrimarySettings() -> Element {
    rsx! {
        div { class: "account-page",
            h1 { "Account settings" }
            Link { to: Route::Account { success: None }, "Back to account" }
        }
    }
}

/// Settings page of the old account layout. Legacy accounts are sent to
/// `PrimarySettings` by the guard before this renders.
#[component]
pub fn LegSettings() -> Element {
    rsx! {
        div { class: "account-page",
            h1 { "Legacy settings" }
            Link { to: Route::PrimarySettings {}, "Open account settings" }
        }
    }
}
