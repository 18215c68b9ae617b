use crate::api::use_api;
use crate::components::notification::{Notifier, Toast};
use crate::web::confirm;
use crate::web::router::Link;
use coursereg::api::enrollments;
use coursereg::shared::Enrollment;
use coursereg::shared::date::display_date;
use coursereg::view_model::{self, messages};
use coursereg::{AppRoute, log_error};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn MyCoursesPage() -> impl IntoView {
    let api = use_api();
    let notifier = Notifier::new();

    let (enrollment_list, set_enrollment_list) = signal(Vec::<Enrollment>::new());
    let (loading, set_loading) = signal(true);
    let (dropping, set_dropping) = signal(Option::<String>::None);

    let load_enrollments = Callback::new({
        let api = api.clone();
        move |()| {
            let api = api.clone();
            spawn_local(async move {
                match enrollments::my_enrollments(&api).await {
                    Ok(data) => {
                        set_enrollment_list.try_set(data);
                    }
                    Err(e) => {
                        log_error!("[MyCourses] {}: {}", messages::LOAD_ENROLLMENTS_FAILED, e);
                        notifier.error(messages::LOAD_ENROLLMENTS_FAILED);
                    }
                }
                set_loading.try_set(false);
            });
        }
    });

    // 初始加载
    load_enrollments.run(());

    let handle_drop = Callback::new(move |(enrollment_id, course_name): (String, String)| {
        if !confirm(&view_model::drop_prompt(&course_name)) {
            return;
        }
        set_dropping.set(Some(enrollment_id.clone()));

        let api = api.clone();
        spawn_local(async move {
            match enrollments::drop_enrollment(&api, &enrollment_id).await {
                Ok(_) => {
                    notifier.success(messages::DROP_SUCCESS);
                    load_enrollments.run(());
                }
                Err(e) => notifier.error(e.detail_or(messages::DROP_FAILED)),
            }
            set_dropping.try_set(None);
        });
    });

    let total_credits = move || enrollment_list.with(|list| view_model::total_credits(list));

    view! {
        <Toast notifier=notifier />
        <Show
            when=move || !loading.get()
            fallback=|| view! { <div class="flex justify-center py-16"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
        >
            <div>
                <h1 class="text-3xl font-bold">"📖 My Courses"</h1>
                <p class="text-base-content/70">"Your enrolled courses for this semester"</p>
            </div>

            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Total Enrollments"</div>
                    <div class="stat-value text-primary">{move || enrollment_list.with(Vec::len)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Total Credits"</div>
                    <div class="stat-value text-secondary">{total_credits}</div>
                </div>
            </div>

            <Show
                when=move || enrollment_list.with(|list| !list.is_empty())
                fallback=|| view! {
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body items-center text-center">
                            <p>"You haven't enrolled in any courses yet."</p>
                            <Link to=AppRoute::Courses class="btn btn-primary">"Browse Courses"</Link>
                        </div>
                    </div>
                }
            >
                <div class="space-y-4">
                    <For
                        each=move || enrollment_list.get()
                        key=|e| e.id.clone()
                        children=move |enrollment: Enrollment| {
                            let enrollment_id = enrollment.id.clone();
                            let course = enrollment.course.clone().unwrap_or_default();
                            let is_dropping = {
                                let enrollment_id = enrollment_id.clone();
                                Memo::new(move |_| dropping.with(|d| d.as_deref() == Some(enrollment_id.as_str())))
                            };
                            let on_drop = {
                                let args = (enrollment_id.clone(), enrollment.course_name().to_string());
                                move |_| handle_drop.run(args.clone())
                            };

                            view! {
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <div class="flex justify-between items-start">
                                            <div>
                                                <span class="font-mono font-bold">{course.code.clone()}</span>
                                                <h2 class="card-title">{course.name.clone()}</h2>
                                            </div>
                                            <span class="badge badge-success">{view_model::status_label(&enrollment)}</span>
                                        </div>
                                        <div class="grid grid-cols-2 gap-2 text-sm">
                                            <div><span class="opacity-60">"Department: "</span>{course.department.clone()}</div>
                                            <div><span class="opacity-60">"Credits: "</span>{course.credits}</div>
                                            <div><span class="opacity-60">"Semester: "</span>{enrollment.semester.clone()}</div>
                                            <div><span class="opacity-60">"Enrolled Date: "</span>{display_date(&enrollment.enrollment_date)}</div>
                                            {enrollment.grade.clone().map(|grade| view! {
                                                <div><span class="opacity-60">"Grade: "</span><span class="font-bold">{grade}</span></div>
                                            })}
                                        </div>
                                        <p class="text-sm text-base-content/70">{course.description.clone()}</p>
                                        <div class="card-actions justify-end">
                                            <button
                                                class="btn btn-error btn-outline btn-sm"
                                                disabled=is_dropping
                                                on:click=on_drop
                                            >
                                                {move || if is_dropping.get() { "Dropping..." } else { "Drop Course" }}
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </Show>
    }
}
