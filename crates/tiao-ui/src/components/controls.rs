//! Buttons and inputs wired to engine commands.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::core::commands::{ControlId, InputField, UiCommand};

/// Button raising the command bound to `control`.
///
/// Busy-sensitive controls render disabled while `blocked` is set.
pub(crate) fn control_button(
    control: ControlId,
    label: impl Into<AttrValue>,
    class: impl Into<Classes>,
    blocked: bool,
    on_command: &Callback<UiCommand>,
) -> Html {
    let disabled = blocked && control.busy_sensitive();
    let class: Classes = class.into();
    let label: AttrValue = label.into();
    let onclick = {
        let on_command = on_command.clone();
        Callback::from(move |_: MouseEvent| on_command.emit(control.command()))
    };
    html! {
        <button type="button" class={class} {disabled} {onclick}>{label}</button>
    }
}

/// Options for [`text_input`].
#[derive(Clone, Copy)]
pub(crate) struct InputOptions {
    pub(crate) kind: &'static str,
    pub(crate) placeholder: &'static str,
    pub(crate) autofocus: bool,
    pub(crate) enabled: bool,
}

impl InputOptions {
    pub(crate) const fn number(placeholder: &'static str) -> Self {
        Self {
            kind: "number",
            placeholder,
            autofocus: false,
            enabled: true,
        }
    }

    pub(crate) const fn text(placeholder: &'static str) -> Self {
        Self {
            kind: "text",
            placeholder,
            autofocus: false,
            enabled: true,
        }
    }

    pub(crate) const fn focused(mut self) -> Self {
        self.autofocus = true;
        self
    }

    pub(crate) const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Input whose every keystroke is reported as [`UiCommand::Edit`].
pub(crate) fn text_input(
    field: InputField,
    value: &str,
    options: InputOptions,
    on_command: &Callback<UiCommand>,
) -> Html {
    let oninput = {
        let on_command = on_command.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                on_command.emit(UiCommand::Edit {
                    field,
                    value: input.value(),
                });
            }
        })
    };
    html! {
        <input
            type={options.kind}
            placeholder={options.placeholder}
            value={value.to_string()}
            disabled={!options.enabled}
            data-autofocus={options.autofocus.then_some("true")}
            {oninput}
        />
    }
}
