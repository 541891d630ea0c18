use crate::shared::api::fetch_one;
use crate::shared::components::table::{format_money, format_number_with_decimals, format_percent};
use crate::shared::components::{Badge, StatCard};
use crate::shared::config::use_config;
use crate::shared::form_utils::parse_opt_f64;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a011_bom::aggregate::{Bom, BomLine};
use contracts::domain::common::Resource;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Batch size of the requirements calculator when the page opens
const DEFAULT_UNITS: u32 = 100;
/// Margin below this is shown as a warning
const TARGET_MARGIN_PERCENT: f64 = 50.0;

/// Whole number of finished units; blank, zero and garbage give `None`.
pub fn parse_units(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|u| *u > 0)
}

pub fn margin_status(margin: Option<f64>) -> IndicatorStatus {
    IndicatorStatus::higher_is_better(margin, TARGET_MARGIN_PERCENT, 0.0)
}

fn uom_label(uom: &Option<String>) -> String {
    uom.clone().unwrap_or_else(|| "pcs".to_string())
}

#[component]
pub fn BomDetail(id: String, on_close: Callback<()>) -> impl IntoView {
    let config = use_config();
    let currency = StoredValue::new(config.currency());

    let bom = RwSignal::new(None::<Bom>);
    let error = RwSignal::new(None::<String>);
    let price_input = RwSignal::new(String::new());
    let units_input = RwSignal::new(DEFAULT_UNITS.to_string());

    {
        let id = id.clone();
        spawn_local(async move {
            match fetch_one::<Bom>(Bom::endpoint(), &id).await {
                Ok(loaded) => {
                    if let Err(e) = loaded.validate() {
                        log::warn!("BOM {}: {}", loaded.code, e);
                    }
                    bom.set(Some(loaded));
                }
                Err(e) => {
                    log::error!("BOM {}: {}", id, e);
                    error.set(Some(format!("Cannot load BOM: {}", e)));
                }
            }
        });
    }

    let cost = move |f: fn(&Bom) -> f64| Signal::derive(move || bom.with(|b| b.as_ref().map(f)));
    let price = Memo::new(move |_| price_input.with(|p| parse_opt_f64(p)));
    let margin = Memo::new(move |_| {
        let price = price.get()?;
        bom.with(|b| b.as_ref().and_then(|b| b.margin_at(price)))
    });
    let units = Memo::new(move |_| units_input.with(|u| parse_units(u)));
    let requirements = Memo::new(move |_| {
        match (units.get(), bom.get()) {
            (Some(units), Some(b)) => b.requirements(units),
            _ => Vec::new(),
        }
    });
    let batch_cost = Signal::derive(move || {
        let units = units.get()?;
        bom.with(|b| b.as_ref().map(|b| b.batch_cost(units)))
    });

    let money = move |v: f64| format!("{}{}", currency.get_value(), format_money(v));

    view! {
        <PageFrame page_id="a011_bom--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || bom.with(|b| b.as_ref().map(|b| format!("BOM {}", b.code)).unwrap_or_else(|| "Bill of materials".to_string()))}
                    </h1>
                    {move || bom.with(|b| b.as_ref().map(|b| view! {
                        <Badge variant="neutral".to_string()>
                            {format!("{} · v{}", b.product_label(), b.version.clone().unwrap_or_else(|| "1".to_string()))}
                        </Badge>
                    }))}
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="Materials" icon_name="layers" value=cost(Bom::material_cost) format=ValueFormat::money(&currency.get_value()) />
                    <StatCard label="Labour" icon_name="factory" value=cost(|b| b.labour_cost) format=ValueFormat::money(&currency.get_value()) />
                    <StatCard label="Overhead" icon_name="layers" value=cost(|b| b.overhead_cost) format=ValueFormat::money(&currency.get_value()) />
                    <StatCard label="Unit cost" icon_name="wallet" value=cost(Bom::unit_cost) format=ValueFormat::money(&currency.get_value()) />
                    <StatCard
                        label="Margin"
                        icon_name="percent"
                        value=Signal::derive(move || margin.get())
                        format=ValueFormat::percent()
                        status=Signal::derive(move || margin_status(margin.get()))
                        subtitle=Signal::derive(move || Some(match price.get() {
                            Some(p) => format!("at price {}", money(p)),
                            None => "enter a selling price".to_string(),
                        }))
                    />
                </div>

                <div class="details-container">
                    <div class="details-header">
                        <h3>"Materials per unit"</h3>
                    </div>
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell min_width=200.0>"Material"</TableHeaderCell>
                                    <TableHeaderCell min_width=70.0>"UoM"</TableHeaderCell>
                                    <TableHeaderCell min_width=90.0>"Quantity"</TableHeaderCell>
                                    <TableHeaderCell min_width=80.0>"Wastage"</TableHeaderCell>
                                    <TableHeaderCell min_width=100.0>"With wastage"</TableHeaderCell>
                                    <TableHeaderCell min_width=100.0>"Unit cost"</TableHeaderCell>
                                    <TableHeaderCell min_width=110.0>"Extended"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || bom.get().map(|b| b.lines).unwrap_or_default().into_iter().map(|line: BomLine| {
                                    let material_name = line.material_name.clone();
                                    let uom = uom_label(&line.uom);
                                    let quantity = format_number_with_decimals(line.quantity, 3);
                                    let wastage = format_percent(Some(line.wastage_pct));
                                    let effective_quantity = format_number_with_decimals(line.effective_quantity(), 3);
                                    let unit_cost = format_money(line.unit_cost);
                                    let extended_cost = format_money(line.extended_cost());
                                    view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{material_name}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>{uom}</TableCell>
                                        <TableCell class="text-right">{quantity}</TableCell>
                                        <TableCell class="text-right">{wastage}</TableCell>
                                        <TableCell class="text-right">{effective_quantity}</TableCell>
                                        <TableCell class="text-right">{unit_cost}</TableCell>
                                        <TableCell class="text-right"><strong>{extended_cost}</strong></TableCell>
                                    </TableRow>
                                }}).collect_view()}
                            </TableBody>
                        </Table>
                    </div>
                </div>

                <div class="details-container">
                    <div class="details-header">
                        <h3>"Costing"</h3>
                    </div>
                    <div class="details-form form-row">
                        <div class="form-group">
                            <label>{format!("Selling price, {}", currency.get_value())}</label>
                            <input
                                type="number"
                                min="0"
                                step="0.01"
                                placeholder="0.00"
                                prop:value=move || price_input.get()
                                on:change=move |ev| price_input.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Units to produce"</label>
                            <input
                                type="number"
                                min="1"
                                step="1"
                                prop:value=move || units_input.get()
                                on:change=move |ev| units_input.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Batch cost"</label>
                            <div class="form-value">
                                {move || batch_cost.get().map(money).unwrap_or_else(|| "—".to_string())}
                            </div>
                        </div>
                    </div>

                    {move || units.get().is_none().then(|| view! {
                        <div class="alert alert--warning">"Enter a whole number of units above zero"</div>
                    })}

                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell min_width=200.0>"Material"</TableHeaderCell>
                                    <TableHeaderCell min_width=70.0>"UoM"</TableHeaderCell>
                                    <TableHeaderCell min_width=120.0>"Required"</TableHeaderCell>
                                    <TableHeaderCell min_width=120.0>"Cost"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || requirements.get().into_iter().map(|req| view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{req.material_name.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>{uom_label(&req.uom)}</TableCell>
                                        <TableCell class="text-right">{format_number_with_decimals(req.quantity, 2)}</TableCell>
                                        <TableCell class="text-right">{format_money(req.cost)}</TableCell>
                                    </TableRow>
                                }).collect_view()}
                            </TableBody>
                        </Table>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("250"), Some(250));
        assert_eq!(parse_units(" 12 "), Some(12));
        assert_eq!(parse_units("0"), None);
        assert_eq!(parse_units("-5"), None);
        assert_eq!(parse_units("1.5"), None);
        assert_eq!(parse_units(""), None);
    }

    #[test]
    fn test_margin_status() {
        assert_eq!(margin_status(Some(62.0)), IndicatorStatus::Good);
        assert_eq!(margin_status(Some(20.0)), IndicatorStatus::Warning);
        assert_eq!(margin_status(Some(-4.0)), IndicatorStatus::Bad);
        assert_eq!(margin_status(None), IndicatorStatus::Neutral);
    }
}
