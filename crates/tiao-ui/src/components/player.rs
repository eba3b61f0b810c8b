//! Player-facing panels: vault, calculator, payment, debts and success.

use yew::prelude::*;

use crate::components::controls::{InputOptions, control_button, text_input};
use crate::components::table::data_table;
use crate::core::commands::{ControlId, InputField, UiCommand};
use crate::core::engine::UiEngine;
use crate::core::format::currency;

const DEBT_HEADERS: [&str; 4] = ["Player", "Citizen ID", "Amount", "Reason"];

fn close_button(on_command: &Callback<UiCommand>) -> Html {
    control_button(ControlId::Close, "Close", "ghost", false, on_command)
}

pub(crate) fn vault_view(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    html! {
        <>
            <h2>{"City Vault"}</h2>
            <p class="balance">{engine.vault_balance().to_string()}</p>
            <div class="actions">{close_button(on_command)}</div>
        </>
    }
}

pub(crate) fn vault_add(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    let busy = engine.busy().controls_disabled();
    html! {
        <>
            <h2>{"Deposit to Vault"}</h2>
            {text_input(
                InputField::VaultAddAmount,
                &engine.inputs().vault_add,
                InputOptions::number("Amount").focused(),
                on_command,
            )}
            <div class="actions">
                {control_button(ControlId::VaultAddConfirm, "Deposit", "primary", busy, on_command)}
                {close_button(on_command)}
            </div>
        </>
    }
}

pub(crate) fn vault_withdraw(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    let busy = engine.busy().controls_disabled();
    html! {
        <>
            <h2>{"Withdraw from Vault"}</h2>
            {text_input(
                InputField::VaultWithdrawAmount,
                &engine.inputs().vault_withdraw,
                InputOptions::number("Amount").focused(),
                on_command,
            )}
            <div class="actions">
                {control_button(ControlId::VaultWithdrawConfirm, "Withdraw", "primary", busy, on_command)}
                {close_button(on_command)}
            </div>
        </>
    }
}

pub(crate) fn tax_calculator(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    let busy = engine.busy().controls_disabled();
    html! {
        <>
            <h2>{"Tax Calculator"}</h2>
            {text_input(
                InputField::CalculatorAmount,
                &engine.inputs().calculator,
                InputOptions::number("Value to estimate").focused(),
                on_command,
            )}
            <div class="actions">
                {control_button(ControlId::CalculatorConfirm, "Calculate", "primary", busy, on_command)}
                {close_button(on_command)}
            </div>
        </>
    }
}

pub(crate) fn payment(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    let busy = engine.busy().controls_disabled();
    let payment = engine.payment();
    html! {
        <>
            <h2>{"Tax Payment"}</h2>
            <p class="amount">{currency(payment.tax, engine.config().number_locale)}</p>
            <p class="reason">{payment.reason.clone()}</p>
            <div class="actions">
                {control_button(ControlId::Pay, "Pay", "primary", busy, on_command)}
                {control_button(ControlId::Refuse, "Refuse", "danger", busy, on_command)}
            </div>
        </>
    }
}

pub(crate) fn success(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    html! {
        <>
            <h2>{"Done"}</h2>
            <p>{engine.success_message().to_string()}</p>
            <div class="actions">{close_button(on_command)}</div>
        </>
    }
}

pub(crate) fn debt_list(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    html! {
        <>
            <h2>{"Active Debts"}</h2>
            {data_table(&DEBT_HEADERS, engine.debts())}
            <div class="actions">{close_button(on_command)}</div>
        </>
    }
}

pub(crate) fn debt_detail(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    let detail = engine.debt_detail();
    let row = |label: &'static str, value: &str| {
        html! {
            <div class="detail-row">
                <span class="muted">{label}</span>
                <strong>{value.to_string()}</strong>
            </div>
        }
    };
    html! {
        <>
            <h2>{"Debt Details"}</h2>
            {row(DEBT_HEADERS[0], &detail.name)}
            {row(DEBT_HEADERS[1], &detail.citizenid)}
            {row(DEBT_HEADERS[2], &detail.amount)}
            {row(DEBT_HEADERS[3], &detail.reason)}
            <div class="actions">{close_button(on_command)}</div>
        </>
    }
}

pub(crate) fn debt_input(engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    let busy = engine.busy().controls_disabled();
    html! {
        <>
            <h2>{engine.debt_input_title()}</h2>
            {text_input(
                InputField::DebtCitizenId,
                &engine.inputs().debt_citizenid,
                InputOptions::text("Citizen ID").focused(),
                on_command,
            )}
            <div class="actions">
                {control_button(ControlId::DebtInputConfirm, "Confirm", "primary", busy, on_command)}
                {close_button(on_command)}
            </div>
        </>
    }
}
