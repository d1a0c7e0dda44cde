use leptos::prelude::*;
use marquee::AlertSurface;

/// 共享错误弹窗的状态
#[derive(Clone, Copy)]
pub struct AlertState {
    message: RwSignal<Option<String>>,
}

impl AlertState {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
        }
    }
}

impl AlertSurface for AlertState {
    fn show(&self, message: &str) {
        self.message.set(Some(message.to_string()));
    }

    fn close(&self) {
        self.message.set(None);
    }
}

#[component]
pub fn AlertModal() -> impl IntoView {
    let alert = expect_context::<AlertState>();
    let is_open = move || alert.message.with(Option::is_some);

    view! {
        <dialog id="alert-modal" class="modal" class:modal-open=is_open>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Notice"</h3>
                <p class="py-4">{move || alert.message.get().unwrap_or_default()}</p>
                <div class="modal-action">
                    <button class="btn" on:click=move |_| alert.close()>
                        "Close"
                    </button>
                </div>
            </div>
        </dialog>
    }
}
