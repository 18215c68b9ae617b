//! 新建课程对话框
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换

use coursereg::shared::CourseDraft;
use coursereg::view_model::validate_draft;
use leptos::prelude::*;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub course_code: RwSignal<String>,
    pub course_name: RwSignal<String>,
    pub department: RwSignal<String>,
    pub credits: RwSignal<u32>,
    pub description: RwSignal<String>,
    pub semester: RwSignal<String>,
    pub max_students: RwSignal<u32>,
}

impl FormState {
    /// 创建新的表单状态，所有字段使用 `CourseDraft` 的默认值
    pub fn new() -> Self {
        let draft = CourseDraft::default();
        Self {
            course_code: RwSignal::new(draft.course_code),
            course_name: RwSignal::new(draft.course_name),
            department: RwSignal::new(draft.department),
            credits: RwSignal::new(draft.credits),
            description: RwSignal::new(draft.description),
            semester: RwSignal::new(draft.semester),
            max_students: RwSignal::new(draft.max_students),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        let draft = CourseDraft::default();
        self.course_code.set(draft.course_code);
        self.course_name.set(draft.course_name);
        self.department.set(draft.department);
        self.credits.set(draft.credits);
        self.description.set(draft.description);
        self.semester.set(draft.semester);
        self.max_students.set(draft.max_students);
    }

    /// 将表单状态转换为 API 请求对象
    pub fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            course_code: self.course_code.get_untracked().trim().to_string(),
            course_name: self.course_name.get_untracked().trim().to_string(),
            department: self.department.get_untracked().trim().to_string(),
            credits: self.credits.get_untracked(),
            description: self.description.get_untracked(),
            semester: self.semester.get_untracked().trim().to_string(),
            max_students: self.max_students.get_untracked(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label} " *"</span>
            </label>
            <input id=id required
                type="text"
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered w-full"
            />
        </div>
    }
}

#[component]
fn NumberField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<u32>,
    min: u32,
    #[prop(optional)] max: Option<u32>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label} " *"</span>
            </label>
            <input id=id required
                type="number"
                min=min.to_string()
                max=max.map(|m| m.to_string())
                prop:value=move || value.get().to_string()
                on:input=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse::<u32>() {
                        value.set(val);
                    }
                }
                class="input input-bordered w-full"
            />
        </div>
    }
}

/// 新建课程对话框
///
/// 提交时交出校验过的 `CourseDraft`，由调用方发送请求；
/// 请求成功后调用方负责关闭对话框并重置表单，失败时表单内容保留。
#[component]
pub fn CourseFormDialog(
    open: RwSignal<bool>,
    form: FormState,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] on_submit: Callback<CourseDraft>,
) -> impl IntoView {
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_form_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let draft = form.to_draft();
        if let Err(msg) = validate_draft(&draft) {
            set_error_msg.set(Some(msg));
            return;
        }

        set_error_msg.set(None);
        on_submit.run(draft);
    };

    view! {
        // 触发按钮
        <button class="btn btn-primary gap-2" on:click=move |_| open.set(true)>
            "+ Create New Course"
        </button>

        // 模态框内容
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Create New Course"</h3>

                <form on:submit=on_form_submit class="space-y-4">
                    <Show when=move || error_msg.with(Option::is_some)>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <TextField id="course_code" label="Course Code" value=form.course_code />
                    <TextField id="course_name" label="Course Name" value=form.course_name />
                    <TextField id="department" label="Department" value=form.department />

                    <div class="grid grid-cols-2 gap-4">
                        <NumberField id="credits" label="Credits" value=form.credits min=1 max=6 />
                        <NumberField id="max_students" label="Max Students" value=form.max_students min=1 />
                    </div>

                    <TextField id="semester" label="Semester" value=form.semester />

                    <div class="form-control">
                        <label for="description" class="label">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea id="description"
                            rows="3"
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                            prop:value=form.description
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary" disabled=submitting>
                            {move || if submitting.get() { "Creating..." } else { "Create Course" }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
