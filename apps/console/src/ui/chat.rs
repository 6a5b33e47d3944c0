use dioxus::prelude::*;
use time::macros::format_description;

use crate::hooks::chat::use_chat;
use crate::hooks::reports::use_chat_stats;
use crate::models::{ChatMessage, ChatStatsSummary, Sender};
use crate::services::filters::humanize;
use crate::services::transcript::{parse_reply, ComplaintEntry, ParsedReply};
use crate::ui::common::text_badge;

const CHAT_END_ID: &str = "chat-end";

#[component]
pub fn AssistantView() -> Element {
    let chat = use_chat();
    let stats = use_chat_stats();
    let mut draft = use_signal(String::new);

    let session = chat.session.read();
    let messages = session.messages().to_vec();
    let waiting = session.is_awaiting_reply();
    drop(session);

    let session_signal = chat.session;
    use_effect(move || {
        let _ = session_signal.read().messages().len();
        scroll_to_latest();
    });

    let summary = stats
        .state
        .read()
        .data
        .as_ref()
        .and_then(ChatStatsSummary::from_value);

    let submit = {
        let chat = chat.clone();
        move || {
            let text = draft.peek().clone();
            if chat.send(&text) {
                draft.set(String::new());
            }
        }
    };
    let mut on_enter = submit.clone();
    let mut on_click = submit;

    rsx! {
        section { class: "space-y-3",
            header { class: "flex flex-col gap-1",
                h2 { class: "text-lg font-semibold text-slate-900", "Complaint assistant" }
                p { class: "text-xs text-slate-500", "Ask about complaint counts, statuses or specific reports." }
            }
            if let Some(summary) = summary {
                {render_summary(&summary)}
            }
            div { class: "h-[28rem] space-y-3 overflow-y-auto rounded-lg border border-slate-200 bg-slate-50 p-3",
                for message in messages {
                    {render_message(message)}
                }
                if waiting {
                    p { class: "text-xs italic text-slate-400", "Assistant is typing..." }
                }
                div { id: CHAT_END_ID }
            }
            div { class: "flex gap-2",
                input {
                    class: "flex-1 rounded border border-slate-300 px-3 py-2 text-sm disabled:bg-slate-100",
                    placeholder: "Type a question",
                    value: "{draft}",
                    disabled: waiting,
                    oninput: move |evt: FormEvent| draft.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            on_enter();
                        }
                    },
                }
                button {
                    class: "rounded bg-blue-600 px-4 py-2 text-sm font-medium text-white hover:bg-blue-700 disabled:opacity-50",
                    disabled: waiting || draft.read().trim().is_empty(),
                    onclick: move |_| on_click(),
                    "Send"
                }
            }
        }
    }
}

fn render_message(message: ChatMessage) -> Element {
    let stamp = message
        .timestamp
        .format(format_description!("[hour]:[minute]"))
        .unwrap_or_default();
    let (row, bubble) = match message.sender {
        Sender::User => ("justify-end", "bg-blue-600 text-white"),
        Sender::Assistant => ("justify-start", "border border-slate-200 bg-white text-slate-800"),
    };
    let content = match message.sender {
        Sender::User => rsx! { p { class: "whitespace-pre-wrap", "{message.text}" } },
        Sender::Assistant => render_reply(&message.text),
    };

    rsx! {
        div { key: "{message.id}", class: format!("flex {row}"),
            div { class: format!("max-w-[80%] space-y-1 rounded-lg px-3 py-2 text-sm {bubble}"),
                {content}
                p { class: "text-right text-[10px] opacity-60", "{stamp}" }
            }
        }
    }
}

fn render_reply(text: &str) -> Element {
    match parse_reply(text) {
        ParsedReply::Plain(text) => rsx! {
            pre { class: "whitespace-pre-wrap font-sans", "{text}" }
        },
        ParsedReply::Structured {
            preamble,
            entries,
            trailer,
        } => rsx! {
            if let Some(preamble) = preamble {
                p { class: "whitespace-pre-wrap", "{preamble}" }
            }
            for entry in entries {
                {render_entry(entry)}
            }
            if let Some(trailer) = trailer {
                p { class: "whitespace-pre-wrap text-slate-600", "{trailer}" }
            }
        },
    }
}

fn render_entry(entry: ComplaintEntry) -> Element {
    rsx! {
        div { key: "{entry.number}", class: "space-y-1 rounded border border-slate-200 bg-slate-50 p-2",
            div { class: "flex flex-wrap items-center gap-1",
                span { class: "text-xs font-semibold text-slate-700", "Complaint {entry.number}" }
                if let Some(priority) = entry.priority.as_deref() {
                    {text_badge(priority)}
                }
                if let Some(status) = entry.status.as_deref() {
                    {text_badge(status)}
                }
            }
            if let Some(report_id) = entry.report_id.as_deref() {
                p { class: "font-mono text-[11px] text-slate-500", "{report_id}" }
            }
            if let Some(category) = entry.category.as_deref() {
                p { class: "text-xs text-slate-600", "Category: {humanize(category)}" }
            }
            if let Some(description) = entry.description.as_deref() {
                p { class: "text-xs text-slate-800", "{description}" }
            }
            for (label, value) in entry.extra {
                p { key: "{label}", class: "text-xs text-slate-600", "{label}: {value}" }
            }
            if let Some(note) = entry.note.as_deref() {
                p { class: "whitespace-pre-wrap text-xs italic text-slate-500", "{note}" }
            }
        }
    }
}

fn render_summary(summary: &ChatStatsSummary) -> Element {
    let count = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |n| n.to_string());
    let total = count(summary.total_complaints);
    let recent = count(summary.recent_complaints);
    rsx! {
        div { class: "flex flex-wrap gap-2 rounded-lg border border-slate-200 bg-white p-3 text-xs text-slate-600 shadow-sm",
            span { "Total: {total}" }
            span { "Last 7 days: {recent}" }
            for (status, count) in summary.by_status.iter() {
                span { key: "{status}", "{humanize(status)}: {count}" }
            }
        }
    }
}

fn scroll_to_latest() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(element) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CHAT_END_ID))
        {
            element.scroll_into_view();
        }
    }
}
