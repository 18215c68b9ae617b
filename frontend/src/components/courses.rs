use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::notification::{Notifier, Toast};
use crate::web::confirm;
use coursereg::api::enrollments;
use coursereg::log_error;
use coursereg::shared::Course;
use coursereg::view_model::{self, CourseCatalog, EnrollAction, messages};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CoursesPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let notifier = Notifier::new();

    let (catalog, set_catalog) = signal(CourseCatalog::default());
    let (loading, set_loading) = signal(true);
    let (filter, set_filter) = signal(String::new());
    let (enrolling, set_enrolling) = signal(Option::<String>::None);

    let load_courses = Callback::new({
        let api = api.clone();
        move |()| {
            let api = api.clone();
            let user_type = auth.user_type_untracked();
            spawn_local(async move {
                match view_model::load_catalog(&api, user_type).await {
                    Ok(data) => {
                        set_catalog.try_set(data);
                    }
                    Err(e) => {
                        log_error!("[Courses] {}: {}", messages::LOAD_COURSES_FAILED, e);
                        notifier.error(messages::LOAD_COURSES_FAILED);
                        set_catalog.try_set(CourseCatalog::default());
                    }
                }
                set_loading.try_set(false);
            });
        }
    });

    // 初始加载
    load_courses.run(());

    let handle_enroll = Callback::new(move |course_id: String| {
        if !confirm(messages::ENROLL_CONFIRM) {
            return;
        }
        set_enrolling.set(Some(course_id.clone()));

        let api = api.clone();
        spawn_local(async move {
            match enrollments::enroll(&api, &course_id).await {
                Ok(_) => {
                    notifier.success(messages::ENROLL_SUCCESS);
                    load_courses.run(());
                }
                // 列表保持不变，直到下一次重新加载
                Err(e) => notifier.error(e.detail_or(messages::ENROLL_FAILED)),
            }
            set_enrolling.try_set(None);
        });
    });

    let filtered = move || {
        catalog.with(|c| {
            filter.with(|q| {
                view_model::filter_courses(&c.courses, q)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<Course>>()
            })
        })
    };
    let total = move || catalog.with(|c| c.courses.len());

    view! {
        <Toast notifier=notifier />
        <Show
            when=move || !loading.get()
            fallback=|| view! { <div class="flex justify-center py-16"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
        >
            <div>
                <h1 class="text-3xl font-bold">"📚 All Courses"</h1>
                <p class="text-base-content/70">"Browse and enroll in available courses"</p>
            </div>

            <input
                type="text"
                placeholder="🔍 Search courses by name, code, or department..."
                on:input=move |ev| set_filter.set(event_target_value(&ev))
                prop:value=filter
                class="input input-bordered w-full"
            />

            <p class="text-sm text-base-content/70">
                "Showing " {move || filtered().len()} " of " {total} " courses"
            </p>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                <For
                    each=filtered
                    key=|course| course.id.clone()
                    children=move |course: Course| {
                        let course_id = course.id.clone();
                        let action = Memo::new({
                            let course = course.clone();
                            move |_| {
                                let pending = enrolling.get();
                                catalog.with(|c| {
                                    EnrollAction::resolve(&course, &c.enrollments, pending.as_deref())
                                })
                            }
                        });

                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <div class="flex justify-between items-center">
                                        <span class="font-mono font-bold">{course.code.clone()}</span>
                                        <span class="badge badge-primary">{course.credits} " credits"</span>
                                    </div>
                                    <h2 class="card-title">{course.name.clone()}</h2>
                                    <div class="text-sm space-y-1">
                                        <div><span class="opacity-60">"Department: "</span>{course.department.clone()}</div>
                                        <div><span class="opacity-60">"Semester: "</span>{course.semester.clone()}</div>
                                        <div><span class="opacity-60">"Capacity: "</span>{course.seats_label()}</div>
                                    </div>
                                    <p class="text-sm text-base-content/70">{course.description.clone()}</p>

                                    <Show when=move || auth.is_student()>
                                        <div class="card-actions justify-end">
                                            <button
                                                class=move || match action.get() {
                                                    EnrollAction::Enrolled => "btn btn-success btn-sm",
                                                    EnrollAction::Full => "btn btn-disabled btn-sm",
                                                    _ => "btn btn-primary btn-sm",
                                                }
                                                disabled=move || !action.get().is_clickable()
                                                on:click={
                                                    let course_id = course_id.clone();
                                                    move |_| handle_enroll.run(course_id.clone())
                                                }
                                            >
                                                {move || action.get().label()}
                                            </button>
                                        </div>
                                    </Show>
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            <Show when=move || filtered().is_empty()>
                <div class="text-center py-8 text-base-content/50">
                    "No courses found matching your search."
                </div>
            </Show>
        </Show>
    }
}
