use crate::auth::use_auth;
use leptos::prelude::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();

    move || {
        let Some(user) = auth.user() else {
            return view! { <></> }.into_any();
        };
        let initial = user.initial().map(String::from).unwrap_or_default();
        let (status_class, status_label) = if user.is_active {
            ("text-success", "✅ Active")
        } else {
            ("text-error", "❌ Inactive")
        };

        view! {
            <div>
                <h1 class="text-3xl font-bold">"👤 My Profile"</h1>
                <p class="text-base-content/70">"Your account information"</p>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body md:flex-row gap-8">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content rounded-full w-24">
                            <span class="text-3xl">{initial}</span>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4 flex-1">
                        <ProfileField label="Full Name">{user.full_name}</ProfileField>
                        <ProfileField label="Username">{user.username}</ProfileField>
                        <ProfileField label="Email">{user.email}</ProfileField>
                        <ProfileField label="User Type">
                            <span class="badge badge-primary">{user.user_type.as_str().to_uppercase()}</span>
                        </ProfileField>
                        <ProfileField label="Account Status">
                            <span class=status_class>{status_label}</span>
                        </ProfileField>
                        <ProfileField label="User ID">
                            <span class="font-mono text-xs">{user.id}</span>
                        </ProfileField>
                    </div>
                </div>
            </div>
        }
        .into_any()
    }
}

#[component]
fn ProfileField(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div>
            <label class="text-sm opacity-60">{label}</label>
            <p class="font-medium">{children()}</p>
        </div>
    }
}
