use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::Credential;

/// Login page. Accepts the uid and ID token issued by the identity provider
/// and hands them to the provider as the signed-in credential.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let mut uid = use_signal(String::new);
    let mut id_token = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let uid_value = uid().trim().to_string();
        let token_value = id_token().trim().to_string();
        if uid_value.is_empty() || token_value.is_empty() {
            error_msg.set(Some("User id and token are required.".to_string()));
            return;
        }
        error_msg.set(None);
        auth.sign_in(Credential {
            uid: uid_value,
            id_token: token_value,
        });
        navigator().push(Route::Account { success: None });
    };

    rsx! {
        div { class: "auth-page",
            h1 { "Sign in" }
            if let Some(msg) = error_msg() {
                p { class: "auth-error", "{msg}" }
            }
            form { onsubmit: handle_login,
                label { r#for: "uid", "User id" }
                input {
                    id: "uid",
                    value: "{uid}",
                    oninput: move |e| uid.set(e.value()),
                }
                label { r#for: "id-token", "ID token" }
                input {
                    id: "id-token",
                    r#type: "password",
                    value: "{id_token}",
                    oninput: move |e| id_token.set(e.value()),
                }
                button { r#type: "submit", "Sign in" }
            }
            p {
                "No account yet? "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}
