//! Table cell for money values
//!
//! ```text
//! <TableCellMoney value=amount />
//! <TableCellMoney value=amount show_currency=true currency=currency.clone() />
//! <TableCellMoney value=outstanding color_by_sign=false bold=true />
//! ```

use super::number_format::format_money;
use leptos::prelude::*;
use thaw::*;

/// Right-aligned money cell with thousands separator; optionally coloured by sign.
#[component]
pub fn TableCellMoney(
    #[prop(into)]
    value: Signal<Option<f64>>,

    /// Currency symbol, shown in front of the amount
    #[prop(optional, into)]
    currency: String,

    #[prop(optional, default = false)]
    show_currency: bool,

    /// Positive values green, negative red
    #[prop(optional, default = false)]
    color_by_sign: bool,

    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let formatted_text = move || match value.get() {
        Some(v) if show_currency => format!("{}{}", currency, format_money(v)),
        Some(v) => format_money(v),
        None => "—".to_string(),
    };

    let cell_style = move || {
        let mut styles = Vec::new();

        if color_by_sign {
            if let Some(v) = value.get() {
                if v > 0.0 {
                    styles.push("color: var(--color-success-700)");
                } else if v < 0.0 {
                    styles.push("color: var(--color-error-700)");
                }
            }
        }

        if bold {
            styles.push("font-weight: 600");
        }

        styles.join("; ")
    };

    view! {
        <TableCell class="text-right">
            <span style=cell_style>
                {formatted_text}
            </span>
        </TableCell>
    }
}
