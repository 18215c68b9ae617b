use leptos::prelude::*;
use std::time::Duration;

/// 页面右上角的提示消息：内容 + 是否出错，3 秒后自动清除
#[derive(Clone, Copy)]
pub struct Notifier {
    notice: RwSignal<Option<(String, bool)>>,
}

impl Notifier {
    pub fn new() -> Self {
        let notice = RwSignal::new(None::<(String, bool)>);

        Effect::new(move |_| {
            if notice.with(Option::is_some) {
                // 页面可能已卸载，所以用 try_set
                set_timeout(
                    move || {
                        notice.try_set(None);
                    },
                    Duration::from_secs(3),
                );
            }
        });

        Self { notice }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notice.try_set(Some((message.into(), false)));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notice.try_set(Some((message.into(), true)));
    }
}

#[component]
pub fn Toast(notifier: Notifier) -> impl IntoView {
    let notice = notifier.notice;

    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if notice.with(|n| n.as_ref().is_some_and(|(_, is_err)| *is_err)) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notice.with(|n| n.as_ref().map(|(msg, _)| msg.clone()).unwrap_or_default())}</span>
                </div>
            </div>
        </Show>
    }
}
