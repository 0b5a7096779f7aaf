pub mod account;
pub mod confirm_email;
pub mod home;
pub mod login;
pub mod not_found;
pub mod payment;
pub mod signup;

use crate::auth::use_auth;
use dioxus::prelude::*;
use guard::HttpRouteGuard;
use shared_types::{GuardState, NavigationIntent};

use account::{Account, LegSettings, PrimarySettings};
use confirm_email::ConfirmEmail;
use home::Home;
use login::Login;
use not_found::NotFound;
use payment::Payment;
use signup::Signup;

/// Application routes. Every page sits behind the account guard.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(AccountGuard)]
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/confirmemail")]
    ConfirmEmail {},
    #[route("/payment?:success")]
    Payment { success: Option<String> },
    #[route("/account?:success")]
    Account { success: Option<String> },
    #[route("/account/primarysettings")]
    PrimarySettings {},
    #[route("/Account/LegSettings")]
    LegSettings {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Account guard layout. Runs the route guard on every navigation and
/// either renders the page or replaces it with the redirect target.
///
/// The origin handed to the guard is the last location it let through.
/// A decision is only applied to the location it was made for; while the
/// guard is still deciding a new location the layout shows the loading state.
#[component]
fn AccountGuard() -> Element {
    let auth = use_auth();
    let route: Route = use_route();
    let destination = route.to_string();
    let key = destination.clone();

    let resource = use_resource(use_reactive!(|(key,)| {
        let guard = auth.guard.clone();
        let mut previous = auth.previous_location;
        async move {
            let origin = previous.peek().clone();
            let intent = NavigationIntent::from_locations(&key, &origin);
            let state = guard.run(&intent).await;
            if state.decision().is_some_and(|d| d.lets_through(&key)) {
                previous.set(key.clone());
            }
            (key, state)
        }
    }));

    let state: GuardState = match &*resource.read() {
        Some((decided_for, state)) if *decided_for == destination => state.clone(),
        _ => HttpRouteGuard::pending(),
    };

    match state.decision() {
        None => rsx! {
            div { class: "auth-guard-loading",
                p { "Loading..." }
            }
        },
        Some(decision) if decision.lets_through(&destination) => rsx! { Outlet::<Route> {} },
        Some(decision) => {
            let target = decision.target().unwrap_or("/").to_string();
            tracing::debug!(from = %destination, to = %target, "Guard redirect");
            match target.parse::<Route>() {
                Ok(next) => navigator().replace(next),
                Err(_) => navigator().replace(NavigationTarget::<Route>::External(target)),
            };
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting..." }
                }
            }
        }
    }
}
