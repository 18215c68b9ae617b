use crate::api::use_api;
use crate::auth::use_auth;
use crate::web::router::Link;
use coursereg::AppRoute;
use coursereg::shared::UserProfile;
use coursereg::view_model::{self, DashboardStats};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (stats, set_stats) = signal(DashboardStats::default());
    let (loading, set_loading) = signal(true);

    // 初始加载
    let user_type = auth.user_type_untracked();
    spawn_local(async move {
        let result = view_model::load_catalog(&api, user_type).await;
        let catalog = view_model::or_empty(result, "Failed to load dashboard data");
        set_stats.try_set(catalog.stats());
        set_loading.try_set(false);
    });

    let user = move || auth.user().unwrap_or_else(|| UserProfile::provisional(""));

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! { <div class="flex justify-center py-16"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
        >
            <div>
                <h1 class="text-3xl font-bold">"Welcome, " {move || user().full_name} "! 👋"</h1>
                <p class="text-base-content/70">"Role: " {move || user().user_type.as_str().to_uppercase()}</p>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-3xl">"📚"</div>
                    <div class="stat-title">"Total Courses"</div>
                    <div class="stat-value text-primary">{move || stats.get().total_courses}</div>
                </div>
                <Show when=move || auth.is_student()>
                    <div class="stat">
                        <div class="stat-figure text-3xl">"✅"</div>
                        <div class="stat-title">"My Enrollments"</div>
                        <div class="stat-value text-success">{move || stats.get().my_enrollments}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-3xl">"🎯"</div>
                        <div class="stat-title">"Total Credits"</div>
                        <div class="stat-value text-secondary">{move || stats.get().total_credits}</div>
                    </div>
                </Show>
                <div class="stat">
                    <div class="stat-figure text-3xl">"📧"</div>
                    <div class="stat-title">"Email"</div>
                    <div class="stat-desc text-base">{move || user().email}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Quick Actions"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                        <QuickAction to=AppRoute::Courses icon="🔍" title="Browse Courses" desc="View all available courses" />
                        <Show when=move || auth.is_student()>
                            <QuickAction to=AppRoute::MyCourses icon="📖" title="My Courses" desc="View your enrollments" />
                        </Show>
                        <Show when=move || auth.is_admin()>
                            <QuickAction to=AppRoute::Admin icon="⚙️" title="Admin Panel" desc="Manage system" />
                        </Show>
                        <QuickAction to=AppRoute::Profile icon="👤" title="Profile" desc="View your profile" />
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn QuickAction(
    to: AppRoute,
    icon: &'static str,
    title: &'static str,
    desc: &'static str,
) -> impl IntoView {
    view! {
        <Link to=to class="card bg-base-200 hover:bg-base-300 transition-colors">
            <div class="card-body items-center text-center p-4">
                <span class="text-3xl">{icon}</span>
                <h3 class="font-bold">{title}</h3>
                <p class="text-sm text-base-content/70">{desc}</p>
            </div>
        </Link>
    }
}
