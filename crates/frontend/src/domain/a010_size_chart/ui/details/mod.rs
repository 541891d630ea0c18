use crate::shared::api::fetch_one;
use crate::shared::components::table::format_number_with_decimals;
use crate::shared::components::Badge;
use crate::shared::form_utils::parse_opt_f64;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a010_size_chart::aggregate::{MeasurementUnit, SizeChart, SizeRegion};
use contracts::domain::common::Resource;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;
use thaw::*;

/// Customer measurements from the fit finder inputs; blank, invalid and
/// non-positive entries are skipped.
pub fn parse_measurements(inputs: &BTreeMap<String, String>) -> BTreeMap<String, f64> {
    inputs
        .iter()
        .filter_map(|(name, raw)| {
            parse_opt_f64(raw)
                .filter(|v| *v > 0.0)
                .map(|v| (name.clone(), v))
        })
        .collect()
}

/// Fit finder answer: the recommended label localized to `region`, or why there is none.
pub fn fit_result(
    chart: &SizeChart,
    measurements: &BTreeMap<String, f64>,
    unit: MeasurementUnit,
    region: SizeRegion,
) -> Result<String, String> {
    if measurements.is_empty() {
        return Err("Enter at least one measurement".to_string());
    }
    let row = chart
        .recommend(measurements, unit)
        .ok_or_else(|| "No size in this chart fits these measurements".to_string())?;
    let localized = SizeRegion::localize_label(&row.label, chart.region, region)
        .unwrap_or_else(|| row.label.clone());
    Ok(if region == chart.region {
        localized
    } else {
        format!("{} {} ({} {})", region.code(), localized, chart.region.code(), row.label)
    })
}

#[component]
pub fn SizeChartDetail(id: String, on_close: Callback<()>) -> impl IntoView {
    let chart = RwSignal::new(None::<SizeChart>);
    let error = RwSignal::new(None::<String>);
    let unit = RwSignal::new(MeasurementUnit::Cm);
    let region = RwSignal::new(SizeRegion::Us);
    let inputs = RwSignal::new(BTreeMap::<String, String>::new());
    let fit = RwSignal::new(None::<Result<String, String>>);

    {
        let id = id.clone();
        spawn_local(async move {
            match fetch_one::<SizeChart>(SizeChart::endpoint(), &id).await {
                Ok(loaded) => {
                    unit.set(loaded.unit);
                    region.set(loaded.region);
                    chart.set(Some(loaded));
                }
                Err(e) => {
                    log::error!("size chart {}: {}", id, e);
                    error.set(Some(format!("Cannot load size chart: {}", e)));
                }
            }
        });
    }

    let displayed = Memo::new(move |_| chart.with(|c| c.as_ref().map(|c| c.in_unit(unit.get()))));
    let localized = Memo::new(move |_| {
        displayed.with(|c| c.as_ref().map(|c| c.localized_labels(region.get())).unwrap_or_default())
    });
    let names = Memo::new(move |_| {
        chart.with(|c| c.as_ref().map(SizeChart::measurement_names).unwrap_or_default())
    });

    let find_size = move || {
        let measurements = inputs.with(parse_measurements);
        let answer = chart.with_untracked(|c| {
            c.as_ref()
                .map(|c| fit_result(c, &measurements, unit.get_untracked(), region.get_untracked()))
        });
        fit.set(answer);
    };

    view! {
        <PageFrame page_id="a010_size_chart--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || chart.with(|c| c.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| "Size chart".to_string()))}
                    </h1>
                    {move || chart.with(|c| c.as_ref().map(|c| view! {
                        <Badge variant="neutral".to_string()>
                            {format!("{} · {}", c.brand.clone().unwrap_or_default(), c.category.clone().unwrap_or_default())}
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
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                <Label>"Units"</Label>
                                {[MeasurementUnit::Cm, MeasurementUnit::Inch]
                                    .into_iter()
                                    .map(|u| view! {
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=Signal::derive(move || {
                                                if unit.get() == u { ButtonAppearance::Primary } else { ButtonAppearance::Secondary }
                                            })
                                            on_click=move |_| {
                                                unit.set(u);
                                                fit.set(None);
                                            }
                                        >
                                            {u.label()}
                                        </Button>
                                    })
                                    .collect_view()}
                            </Flex>
                            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                <Label>"Size system"</Label>
                                <select
                                    class="filter-select"
                                    on:change=move |ev| {
                                        if let Some(r) = SizeRegion::from_code(&event_target_value(&ev)) {
                                            region.set(r);
                                            fit.set(None);
                                        }
                                    }
                                >
                                    {move || {
                                        let current = region.get();
                                        SizeRegion::all()
                                            .into_iter()
                                            .map(|r| view! { <option value=r.code() selected={r == current}>{r.code()}</option> })
                                            .collect_view()
                                    }}
                                </select>
                            </Flex>
                        </div>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=80.0>
                                    {move || chart.with(|c| c.as_ref().map(|c| format!("Size ({})", c.region.code())).unwrap_or_default())}
                                </TableHeaderCell>
                                <TableHeaderCell min_width=80.0>{move || region.get().code()}</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>"Alpha"</TableHeaderCell>
                                <For
                                    each=move || names.get()
                                    key=|name| name.clone()
                                    children=move |name: String| view! {
                                        <TableHeaderCell min_width=90.0>
                                            {move || format!("{}, {}", name, unit.get().label())}
                                        </TableHeaderCell>
                                    }
                                />
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let chart_region = chart.with(|c| c.as_ref().map(|c| c.region).unwrap_or_default());
                                let labels = localized.get();
                                let columns = names.get();
                                displayed
                                    .get()
                                    .map(|c| c.rows)
                                    .unwrap_or_default()
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, row)| {
                                        let local = labels.get(i).cloned().unwrap_or_default();
                                        let alpha = chart_region.alpha_label(&row.label).unwrap_or("—");
                                        let values = columns
                                            .iter()
                                            .map(|name| {
                                                let value = row
                                                    .measurements
                                                    .get(name)
                                                    .map(|v| format_number_with_decimals(*v, 1))
                                                    .unwrap_or_else(|| "—".to_string());
                                                view! { <TableCell class="text-right">{value}</TableCell> }
                                            })
                                            .collect_view();
                                        view! {
                                            <TableRow>
                                                <TableCell><strong>{row.label.clone()}</strong></TableCell>
                                                <TableCell>{local}</TableCell>
                                                <TableCell>{alpha}</TableCell>
                                                {values}
                                            </TableRow>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <div class="details-container fit-finder">
                    <div class="details-header">
                        <h3>"Fit finder"</h3>
                    </div>
                    <div class="details-form form-row">
                        <For
                            each=move || names.get()
                            key=|name| name.clone()
                            children=move |name: String| {
                                let field = name.clone();
                                let label = name.clone();
                                view! {
                                    <div class="form-group">
                                        <label>{move || format!("{}, {}", label, unit.get().label())}</label>
                                        <input
                                            type="number"
                                            min="0"
                                            step="0.1"
                                            prop:value=move || inputs.with(|m| m.get(&name).cloned().unwrap_or_default())
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                inputs.update(|m| {
                                                    m.insert(field.clone(), value);
                                                });
                                            }
                                        />
                                    </div>
                                }
                            }
                        />
                    </div>
                    <div class="details-actions">
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| find_size()>
                            {icon("ruler")}
                            " Find size"
                        </Button>
                    </div>
                    {move || fit.get().map(|answer| match answer {
                        Ok(label) => view! {
                            <div class="alert alert--success">"Recommended size: " <strong>{label}</strong></div>
                        }.into_any(),
                        Err(message) => view! { <div class="alert alert--warning">{message}</div> }.into_any(),
                    })}
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a010_size_chart::aggregate::SizeRow;

    fn chart() -> SizeChart {
        let row = |label: &str, bust: f64| SizeRow {
            label: label.into(),
            measurements: [("bust".to_string(), bust)].into_iter().collect(),
        };
        SizeChart {
            id: "sc".into(),
            name: "Tops".into(),
            region: SizeRegion::Us,
            unit: MeasurementUnit::Cm,
            rows: vec![row("4", 84.0), row("6", 88.0), row("8", 92.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_measurements_skips_blank_and_invalid() {
        let inputs: BTreeMap<String, String> = [
            ("bust".to_string(), "86,5".to_string()),
            ("waist".to_string(), "".to_string()),
            ("hip".to_string(), "abc".to_string()),
            ("inseam".to_string(), "-3".to_string()),
        ]
        .into_iter()
        .collect();
        let parsed = parse_measurements(&inputs);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["bust"], 86.5);
    }

    #[test]
    fn test_fit_result() {
        let c = chart();
        let m: BTreeMap<String, f64> = [("bust".to_string(), 86.0)].into_iter().collect();
        assert_eq!(fit_result(&c, &m, MeasurementUnit::Cm, SizeRegion::Us), Ok("6".to_string()));
        assert_eq!(
            fit_result(&c, &m, MeasurementUnit::Cm, SizeRegion::Eu),
            Ok("EU 38 (US 6)".to_string())
        );
        let too_big: BTreeMap<String, f64> = [("bust".to_string(), 120.0)].into_iter().collect();
        assert!(fit_result(&c, &too_big, MeasurementUnit::Cm, SizeRegion::Us).is_err());
        assert!(fit_result(&c, &BTreeMap::new(), MeasurementUnit::Cm, SizeRegion::Us).is_err());
    }
}
