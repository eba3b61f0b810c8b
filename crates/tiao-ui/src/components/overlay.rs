use yew::prelude::*;

use crate::components::{admin, player};
use crate::core::commands::UiCommand;
use crate::core::engine::UiEngine;
use crate::core::panels::{OverlayState, PanelId};

#[derive(Properties, PartialEq)]
pub(crate) struct OverlayProps {
    pub(crate) engine: UiEngine,
    pub(crate) on_command: Callback<UiCommand>,
}

/// Root overlay. At most one panel is mounted; while closing, the last panel
/// stays mounted under the `closing` class until the transition ends.
#[function_component(Overlay)]
pub(crate) fn overlay(props: &OverlayProps) -> Html {
    let visibility = props.engine.visibility();
    let state_class = match visibility.overlay {
        OverlayState::Hidden => "hidden",
        OverlayState::Shown => "shown",
        OverlayState::Closing => "closing",
    };
    let panel = visibility.visible_panel();
    html! {
        <div id="tiao-overlay" class={classes!("overlay", state_class)}>
            {panel.map_or_else(Html::default, |panel| render_panel(panel, &props.engine, &props.on_command))}
        </div>
    }
}

fn render_panel(panel: PanelId, engine: &UiEngine, on_command: &Callback<UiCommand>) -> Html {
    let body = match panel {
        PanelId::VaultView => player::vault_view(engine, on_command),
        PanelId::VaultAdd => player::vault_add(engine, on_command),
        PanelId::VaultWithdraw => player::vault_withdraw(engine, on_command),
        PanelId::TaxCalculator => player::tax_calculator(engine, on_command),
        PanelId::Payment => player::payment(engine, on_command),
        PanelId::DebtList => player::debt_list(engine, on_command),
        PanelId::DebtDetail => player::debt_detail(engine, on_command),
        PanelId::DebtInput => player::debt_input(engine, on_command),
        PanelId::AdminDashboard => admin::dashboard(engine, on_command),
        PanelId::Success => player::success(engine, on_command),
    };
    let style = format!("display: {}", panel.layout().css_display());
    html! {
        <section id={panel.dom_id()} class="panel" {style}>{body}</section>
    }
}
