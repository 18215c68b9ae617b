use crate::api::use_api;
use crate::auth::use_auth;
use crate::web::router::use_router;
use coursereg::auth::LOGIN_FAILED_MESSAGE;
use coursereg::{AppRoute, sign_in};
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEMO_ACCOUNTS: [(&str, &str, &str); 3] = [
    ("Admin", "admin", "admin123"),
    ("Teacher", "teacher1", "teacher123"),
    ("Student", "student1", "student123"),
];

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match sign_in(&api, &auth, &user, &pass).await {
                Ok(_) => router.navigate(AppRoute::landing().to_path()),
                Err(e) => {
                    set_error_msg.try_set(Some(e.detail_or(LOGIN_FAILED_MESSAGE)));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"🎓 Course Registration System"</h1>
                    <p class="text-base-content/70">"Welcome back! Please login to continue"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                placeholder="Enter your username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                                autofocus
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="Enter your password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                    </form>

                    <div class="px-8 pb-6 text-sm">
                        <h3 class="font-semibold mb-2">"Demo Accounts:"</h3>
                        <ul class="space-y-1 text-base-content/70">
                            {DEMO_ACCOUNTS
                                .iter()
                                .map(|(role, user, pass)| view! {
                                    <li><strong>{*role} ":"</strong> " " {*user} " / " {*pass}</li>
                                })
                                .collect_view()}
                        </ul>
                    </div>
                </div>
            </div>
        </div>
    }
}
