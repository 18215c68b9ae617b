use crate::api::use_api;
use crate::components::course_form::{CourseFormDialog, FormState};
use crate::components::notification::{Notifier, Toast};
use crate::web::confirm;
use coursereg::api::courses;
use coursereg::shared::{Course, CourseDraft};
use coursereg::view_model::{self, AdminStats, messages};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn AdminPanelPage() -> impl IntoView {
    let api = use_api();
    let notifier = Notifier::new();

    let (course_list, set_course_list) = signal(Vec::<Course>::new());
    let (loading, set_loading) = signal(true);
    let dialog_open = RwSignal::new(false);
    let (creating, set_creating) = signal(false);
    let form = FormState::new();

    let load_courses = Callback::new({
        let api = api.clone();
        move |()| {
            let api = api.clone();
            spawn_local(async move {
                let result = courses::list(&api, None).await;
                set_course_list.try_set(view_model::or_empty(result, messages::LOAD_COURSES_FAILED));
                set_loading.try_set(false);
            });
        }
    });

    // 初始加载
    load_courses.run(());

    let handle_create = Callback::new({
        let api = api.clone();
        move |draft: CourseDraft| {
            // 上一次创建请求未返回时忽略重复提交
            if set_creating.try_update(view_model::begin_submit) != Some(true) {
                return;
            }

            let api = api.clone();
            spawn_local(async move {
                match courses::create(&api, &draft).await {
                    Ok(_) => {
                        notifier.success(messages::CREATE_SUCCESS);
                        dialog_open.try_set(false);
                        form.reset();
                        load_courses.run(());
                    }
                    Err(e) => notifier.error(e.detail_or(messages::CREATE_FAILED)),
                }
                set_creating.try_set(false);
            });
        }
    });

    let handle_delete = Callback::new(move |(course_id, course_name): (String, String)| {
        if !confirm(&view_model::delete_prompt(&course_name)) {
            return;
        }

        let api = api.clone();
        spawn_local(async move {
            match courses::delete(&api, &course_id).await {
                Ok(_) => {
                    notifier.success(messages::DELETE_SUCCESS);
                    load_courses.run(());
                }
                Err(e) => notifier.error(e.detail_or(messages::DELETE_FAILED)),
            }
        });
    });

    let stats = move || course_list.with(|list| AdminStats::new(list));

    view! {
        <Toast notifier=notifier />
        <Show
            when=move || !loading.get()
            fallback=|| view! { <div class="flex justify-center py-16"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
        >
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"⚙️ Admin Panel"</h1>
                <CourseFormDialog open=dialog_open form=form submitting=creating on_submit=handle_create />
            </div>

            <div class="stats shadow w-full bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Total Courses"</div>
                    <div class="stat-value text-primary">{move || stats().total_courses}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Total Enrollments"</div>
                    <div class="stat-value text-secondary">{move || stats().total_enrollments}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <h2 class="card-title p-6 pb-2">"All Courses"</h2>
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Code"</th>
                                    <th>"Name"</th>
                                    <th>"Department"</th>
                                    <th>"Credits"</th>
                                    <th>"Semester"</th>
                                    <th>"Enrolled/Max"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || course_list.get()
                                    key=|c| c.id.clone()
                                    children=move |course: Course| {
                                        let args = (course.id.clone(), course.name.clone());
                                        view! {
                                            <tr>
                                                <td class="font-mono">{course.code.clone()}</td>
                                                <td>{course.name.clone()}</td>
                                                <td>{course.department.clone()}</td>
                                                <td>{course.credits}</td>
                                                <td>{course.semester.clone()}</td>
                                                <td>{course.seats_label()}</td>
                                                <td>
                                                    <button
                                                        class="btn btn-error btn-outline btn-xs"
                                                        on:click=move |_| handle_delete.run(args.clone())
                                                    >
                                                        "Delete"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </Show>
    }
}
