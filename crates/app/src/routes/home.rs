use crate::routes::Route;
use dioxus::prelude::*;

#[component]
pub fn Home() -> Element {
    rsx! {
        div { class: "home-page",
            h1 { "Welcome" }
            nav {
                Link { to: Route::Login {}, "Sign in" }
                " · "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}
