//! トースト通知コンポーネント
//!
//! 生成から100msで表示、3000msで非表示開始、その300ms後に要素を削除する。
//! タイマーは取り消さない。同時に出せる件数には上限があり、超えた分は古い順に即削除する。

use gloo::timers::future::TimeoutFuture;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::models::ToastKind;
use crate::utils::log_trace::log_info;

pub const SHOW_DELAY_MS: u32 = 100;
pub const HIDE_DELAY_MS: u32 = 3000;
pub const REMOVE_DELAY_MS: u32 = 300;

const SHOW_CLASS: &str = "show";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// 生成直後（透明）
    Entering,
    Shown,
    /// フェードアウト中
    Hiding,
}

/// 生成からの経過時間と、その時点での遷移先（None は削除）
pub const SCHEDULE: [(u32, Option<ToastPhase>); 3] = [
    (SHOW_DELAY_MS, Some(ToastPhase::Shown)),
    (HIDE_DELAY_MS, Some(ToastPhase::Hiding)),
    (HIDE_DELAY_MS + REMOVE_DELAY_MS, None),
];

/// SCHEDULE を「前の遷移からの待ち時間」に直したもの
pub fn step_delays() -> impl Iterator<Item = (u32, Option<ToastPhase>)> {
    SCHEDULE.iter().scan(0u32, |elapsed, &(at, next)| {
        let wait = at.saturating_sub(*elapsed);
        *elapsed = at;
        Some((wait, next))
    })
}

pub fn toast_class(kind: ToastKind, phase: ToastPhase) -> String {
    let base = kind.class_name();
    match phase {
        ToastPhase::Shown => format!("{} {}", base, SHOW_CLASS),
        ToastPhase::Entering | ToastPhase::Hiding => base,
    }
}

/// 表示中トーストの上限付きリスト（古い順）
#[derive(Debug, Clone)]
pub struct ToastStack<T> {
    entries: Vec<(u64, T)>,
    limit: usize,
}

impl<T> ToastStack<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// 追加し、上限を超えて押し出されたものを返す
    pub fn push(&mut self, id: u64, item: T) -> Vec<T> {
        self.entries.push((id, item));
        let overflow = self.entries.len().saturating_sub(self.limit);
        self.entries.drain(..overflow).map(|(_, item)| item).collect()
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        let pos = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, item)| item)
    }
}

/// 通知の送り先
pub trait Notifier {
    fn notify(&self, message: &str, kind: ToastKind);
}

#[derive(Clone)]
struct ToastView {
    id: u64,
    message: String,
    kind: ToastKind,
    phase: RwSignal<ToastPhase>,
}

#[component]
fn ToastHost(toasts: RwSignal<ToastStack<ToastView>>) -> impl IntoView {
    view! {
        <For
            each=move || toasts.with(|stack| stack.iter().cloned().collect::<Vec<_>>())
            key=|toast: &ToastView| toast.id
            children=move |toast: ToastView| {
                let kind = toast.kind;
                let phase = toast.phase;
                view! {
                    <div class=move || toast_class(kind, phase.get())>{toast.message}</div>
                }
            }
        />
    }
}

/// body直下にトーストを描画する通知
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<ToastStack<ToastView>>,
    next_id: StoredValue<u64>,
}

impl ToastNotifier {
    pub fn mount(max_toasts: usize) -> Self {
        let toasts = create_rw_signal(ToastStack::new(max_toasts));
        let next_id = store_value(0u64);
        mount_to_body(move || view! { <ToastHost toasts=toasts /> });
        Self { toasts, next_id }
    }

    pub fn visible_count(&self) -> usize {
        self.toasts.with_untracked(|stack| stack.len())
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, kind: ToastKind) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        let phase = create_rw_signal(ToastPhase::Entering);
        let toast = ToastView {
            id,
            message: message.to_string(),
            kind,
            phase,
        };

        let evicted = self
            .toasts
            .try_update(|stack| stack.push(id, toast))
            .unwrap_or_default();
        if !evicted.is_empty() {
            log_info("toast", &format!("上限超過のため {} 件を削除", evicted.len()));
        }
        for old in evicted {
            old.phase.dispose();
        }

        let toasts = self.toasts;
        spawn_local(async move {
            for (wait, next) in step_delays() {
                TimeoutFuture::new(wait).await;
                // 上限超過で先に削除されていれば残りは何もしない
                if !toasts.with_untracked(|stack| stack.contains(id)) {
                    return;
                }
                match next {
                    Some(next) => phase.set(next),
                    None => {
                        if let Some(removed) = toasts.try_update(|stack| stack.remove(id)).flatten() {
                            removed.phase.dispose();
                        }
                    }
                }
            }
        });
    }
}
