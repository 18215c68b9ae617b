use crate::api::use_api;
use crate::auth::use_auth;
use crate::web::router::{Link, use_router};
use coursereg::{AppRoute, sign_out};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 已登录页面的外框：导航栏 + 内容区
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    // 路由切换时整个页面（包括外框）重新渲染，这里不需要订阅
    let nav_class = move |route: AppRoute| {
        if router.current_route().get_untracked() == route {
            "btn btn-ghost btn-sm btn-active"
        } else {
            "btn btn-ghost btn-sm"
        }
    };

    // 路由服务监听会话变化，注销后自动回到登录页
    let on_logout = move |_| {
        let api = api.clone();
        spawn_local(async move {
            sign_out(&api, &auth).await;
        });
    };

    let user_label = move || {
        auth.user()
            .map(|u| format!("👤 {} ({})", u.full_name, u.user_type))
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-xl px-4">
                <div class="flex-1 gap-2">
                    <span class="text-xl font-bold">"🎓 Course Registration"</span>
                </div>
                <div class="flex-none gap-1">
                    <Link to=AppRoute::Dashboard class=nav_class(AppRoute::Dashboard)>"Dashboard"</Link>
                    <Link to=AppRoute::Courses class=nav_class(AppRoute::Courses)>"All Courses"</Link>
                    <Link to=AppRoute::MyCourses class=nav_class(AppRoute::MyCourses)>"My Courses"</Link>
                    <Show when=move || auth.is_admin()>
                        <Link to=AppRoute::Admin class=nav_class(AppRoute::Admin)>"Admin Panel"</Link>
                    </Show>
                </div>
                <div class="flex-none gap-2 ml-4">
                    <Link to=AppRoute::Profile class="text-sm opacity-80 hover:underline">{user_label}</Link>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm">"Logout"</button>
                </div>
            </div>

            <main class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
                {children()}
            </main>
        </div>
    }
}
