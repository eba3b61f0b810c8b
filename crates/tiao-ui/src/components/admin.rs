//! Admin dashboard: navigation, metrics, settings, issuance, operations and
//! audit log.
//!
//! # Design
//! - Every section is rendered from [`AdminReconciler`] state; the only local
//!   state in the view tree is what the browser keeps inside inputs.
//! - Manual inputs are disabled unless their knob is in manual mode; the save
//!   button is disabled until the draft is dirty.

use tiao_protocol::{ModeTarget, SettingMode};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::controls::{InputOptions, control_button, text_input};
use crate::components::table::data_table;
use crate::core::admin::issue::{IssueField, TARGET_CITIZEN_ID};
use crate::core::admin::{AdminReconciler, AdminView};
use crate::core::commands::{ControlId, InputField, UiCommand};
use crate::core::engine::UiEngine;

const LOG_HEADERS: [&str; 3] = ["Time", "Category", "Message"];
const TARGET_MODES: [(&str, &str); 2] = [
    (TARGET_CITIZEN_ID, "Citizen ID"),
    ("all_online", "All online players"),
];

const fn view_label(view: AdminView) -> &'static str {
    match view {
        AdminView::Overview => "Overview",
        AdminView::Settings => "Settings",
        AdminView::Issue => "Issue Tax",
        AdminView::Operations => "Operations",
        AdminView::Logs => "Logs",
    }
}

const fn target_label(target: ModeTarget) -> &'static str {
    match target {
        ModeTarget::Inflation => "Inflation",
        ModeTarget::TaxRate => "Tax rate",
    }
}

pub(crate) fn dashboard(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    let admin = engine.admin();
    let busy = engine.busy().controls_disabled();
    let section = match admin.view() {
        AdminView::Overview => overview(admin, busy, on_command),
        AdminView::Settings => settings(admin, busy, on_command),
        AdminView::Issue => issue(engine, busy, on_command),
        AdminView::Operations => operations(busy, on_command),
        AdminView::Logs => logs(engine, busy, on_command),
    };
    html! {
        <>
            <nav class="admin-nav">
                {for AdminView::ALL.into_iter().map(|view| {
                    let class = classes!("nav-item", (view == admin.view()).then_some("active"));
                    control_button(ControlId::Nav(view), view_label(view), class, busy, on_command)
                })}
                {control_button(ControlId::Close, "Close", "ghost", busy, on_command)}
            </nav>
            <main class="admin-main" data-view={admin.view().as_str()}>{section}</main>
        </>
    }
}

fn overview(admin: &AdminReconciler, busy: bool, on_command: &Callback<UiCommand>) -> Html {
    let metrics = admin.metrics();
    let card = |label: &'static str, value: &str| {
        html! {
            <div class="metric">
                <span class="muted">{label}</span>
                <strong>{value.to_string()}</strong>
            </div>
        }
    };
    html! {
        <>
            <h2>{"Economy Overview"}</h2>
            <div class="metrics">
                {card("Vault", &metrics.vault)}
                {card("Inflation", &metrics.inflation)}
                {card("Tax rate", &metrics.taxrate)}
                {card("Collected today", &metrics.today)}
            </div>
            <div class="actions">
                {control_button(ControlId::AdminRefresh, "Refresh", "primary", busy, on_command)}
            </div>
        </>
    }
}

fn settings(admin: &AdminReconciler, busy: bool, on_command: &Callback<UiCommand>) -> Html {
    let knob = |target: ModeTarget| {
        let manual = admin.manual_enabled(target);
        let segment = |mode: SettingMode, label: &'static str| {
            let class = classes!("seg", (mode.is_manual() == manual).then_some("active"));
            control_button(ControlId::ModeToggle(target, mode), label, class, busy, on_command)
        };
        html! {
            <div class="knob" data-target={target.key()}>
                <span>{target_label(target)}</span>
                <div class="seg-group">
                    {segment(SettingMode::Auto, "Auto")}
                    {segment(SettingMode::Manual, "Manual")}
                </div>
                {text_input(
                    InputField::Manual(target),
                    admin.manual_text(target),
                    InputOptions::text("Manual value").enabled(manual),
                    on_command,
                )}
            </div>
        }
    };
    html! {
        <>
            <h2>{"Economy Settings"}</h2>
            {if admin.is_ready() {
                html! { for ModeTarget::ALL.into_iter().map(knob) }
            } else {
                html! { <p class="muted">{"Waiting for server settings..."}</p> }
            }}
            <div class="actions">
                {control_button(
                    ControlId::AdminSave,
                    "Save",
                    "primary",
                    busy || !admin.is_dirty(),
                    on_command,
                )}
            </div>
        </>
    }
}

fn issue(engine: &UiEngine, busy: bool, on_command: &Callback<UiCommand>) -> Html {
    let admin = engine.admin();
    let form = admin.issue();
    let on_tax_type = {
        let on_command = on_command.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                on_command.emit(UiCommand::SelectTaxType(select.value()));
            }
        })
    };
    let on_target_mode = {
        let on_command = on_command.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                on_command.emit(UiCommand::SetTargetMode(select.value()));
            }
        })
    };
    let input = |field: IssueField, options: InputOptions| {
        text_input(InputField::Issue(field), form.field(field), options, on_command)
    };
    html! {
        <>
            <h2>{"Issue Tax"}</h2>
            <label>
                <span>{"Type"}</span>
                <select onchange={on_tax_type}>
                    {for admin.tax_catalog().iter().map(|entry| html! {
                        <option value={entry.key.clone()} selected={entry.key == form.tax_type()}>
                            {entry.label.clone()}
                        </option>
                    })}
                </select>
            </label>
            <div class="chips">
                {for admin.tax_catalog().iter().map(|entry| {
                    let class = classes!("chip", (entry.key == form.tax_type()).then_some("active"));
                    control_button(
                        ControlId::TaxChip(entry.key.clone()),
                        entry.label.clone(),
                        class,
                        busy,
                        on_command,
                    )
                })}
            </div>
            <label><span>{"Base value"}</span>{input(IssueField::Base, InputOptions::number("Base"))}</label>
            <label><span>{"Amount"}</span>{input(IssueField::Amount, InputOptions::number("Amount"))}</label>
            <label><span>{"Reason"}</span>{input(IssueField::Reason, InputOptions::text("Reason"))}</label>
            <label>
                <span>{"Target"}</span>
                <select onchange={on_target_mode}>
                    {for TARGET_MODES.iter().map(|(value, label)| html! {
                        <option value={*value} selected={*value == form.target_mode()}>{*label}</option>
                    })}
                </select>
            </label>
            {if form.citizen_field_visible() {
                html! {
                    <label>
                        <span>{"Citizen ID"}</span>
                        {input(IssueField::CitizenId, InputOptions::text("Citizen ID"))}
                    </label>
                }
            } else {
                html! {}
            }}
            <p class="preview">{form.preview().to_string()}</p>
            <div class="actions">
                {control_button(ControlId::IssueCalc, "Calculate", "ghost", busy, on_command)}
                {control_button(ControlId::IssueSubmit, "Issue", "primary", busy, on_command)}
            </div>
            {if let Some(status) = form.status() {
                html! {
                    <p class={classes!("status", engine.issue_status_class())}>
                        {status.message.clone()}
                    </p>
                }
            } else {
                html! {}
            }}
        </>
    }
}

fn operations(busy: bool, on_command: &Callback<UiCommand>) -> Html {
    let shortcuts = [
        (ControlId::AdminViewVault, "View vault"),
        (ControlId::AdminAddVault, "Deposit"),
        (ControlId::AdminWithdrawVault, "Withdraw"),
        (ControlId::AdminViewDebts, "Active debts"),
        (ControlId::AdminViewSpecificDebt, "Find debt"),
        (ControlId::AdminCollectDebt, "Collect debt"),
    ];
    html! {
        <>
            <h2>{"Operations"}</h2>
            <div class="shortcuts">
                {for shortcuts.into_iter().map(|(control, label)| {
                    control_button(control, label, "ghost", busy, on_command)
                })}
            </div>
        </>
    }
}

fn logs(engine: &UiEngine, busy: bool, on_command: &Callback<UiCommand>) -> Html {
    html! {
        <>
            <h2>{"Audit Log"}</h2>
            <div class="actions">
                {control_button(ControlId::AdminFetchLogs, "Load", "primary", busy, on_command)}
            </div>
            {data_table(&LOG_HEADERS, engine.audit_log())}
        </>
    }
}
