use yew::prelude::*;

use crate::core::render::TableBody;

/// Table with `headers` and a pre-rendered body. Cells are always text.
pub(crate) fn data_table(headers: &[&'static str], body: &TableBody) -> Html {
    html! {
        <table class="data-table">
            <thead>
                <tr>{for headers.iter().map(|header| html! { <th>{*header}</th> })}</tr>
            </thead>
            <tbody>
                {for body.rows.iter().map(|row| html! {
                    <tr>{for row.cells.iter().map(|cell| html! { <td>{cell.clone()}</td> })}</tr>
                })}
                {if let Some(placeholder) = &body.placeholder {
                    html! {
                        <tr>
                            <td colspan={placeholder.colspan.to_string()} class="muted">
                                {placeholder.text}
                            </td>
                        </tr>
                    }
                } else {
                    html! {}
                }}
            </tbody>
        </table>
    }
}
