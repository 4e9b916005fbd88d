use dioxus::prelude::*;

use super::component::{send_detached, PANEL_STATE};
use super::controls::{control, groups, ControlKind, Trigger, CONTROLS};

#[component]
pub fn StyleControls() -> Element {
    rsx! {
        div {
            class: "styles-editor",
            for group in groups() {
                div { class: "tool-group", key: "{group}",
                    h3 { style: "margin: 12px 0 6px 0; font-size: 13px;", "{group}" }
                    for binding in CONTROLS.iter().filter(|c| c.group == group) {
                        ControlRow { key: "{binding.id}", id: binding.id }
                    }
                }
            }
        }
    }
}

#[component]
fn ControlRow(id: &'static str) -> Element {
    let Some(binding) = control(id) else {
        return rsx!(div { "Unknown control" });
    };
    let value = PANEL_STATE.read().value(id);
    let trigger = binding.trigger;
    let on_input = move |e: FormEvent| {
        if trigger == Trigger::Input {
            on_control(id, e.value());
        }
    };
    let on_change = move |e: FormEvent| {
        if trigger == Trigger::Change {
            on_control(id, e.value());
        }
    };

    let input = match binding.kind {
        ControlKind::Select(options) => rsx! {
            select {
                id: "{id}",
                value: "{value}",
                oninput: on_input,
                onchange: on_change,
                for (option_value, text) in options.iter() {
                    option { value: "{option_value}", "{text}" }
                }
            }
        },
        ControlKind::Slider { min, max } => {
            let shown = binding.transform.label(&value);
            rsx! {
                input {
                    id: "{id}",
                    r#type: "range",
                    min: "{min}",
                    max: "{max}",
                    value: "{value}",
                    oninput: on_input,
                    onchange: on_change,
                }
                span { class: "value", id: "{id}Value", "{shown}" }
            }
        }
        ControlKind::ColorPicker => rsx! {
            input {
                id: "{id}",
                r#type: "color",
                value: "{value}",
                oninput: on_input,
                onchange: on_change,
            }
        },
    };

    rsx! {
        div {
            class: "tool-row",
            style: "display: flex; align-items: center; gap: 8px; margin-bottom: 6px;",
            label { r#for: "{id}", style: "width: 96px; font-size: 12px;", "{binding.label}" }
            {input}
        }
    }
}

fn on_control(id: &'static str, raw: String) {
    let request = PANEL_STATE.write().edit(id, &raw);
    if let Some(request) = request {
        send_detached(request);
    }
}
