use crate::calendar::Month;
use crate::core::consumption::MonthlyConsumption;
use crate::errors::ChartError;
use plotters::prelude::*;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

pub const CHART_SIZE: (u32, u32) = (1200, 600);

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Draw a bar chart of the monthly consumption and save it as an SVG image at `path`.
#[instrument(skip(consumption))]
pub fn render_consumption_chart(
    consumption: &MonthlyConsumption,
    path: &Path,
) -> Result<(), ChartError> {
    draw_bars(consumption, path).map_err(|err| ChartError::new(path.to_path_buf(), err))?;

    info!(path = %path.display(), "consumption chart saved");
    Ok(())
}

fn month_label(x: &f64) -> String {
    usize::try_from(x.round() as i64)
        .ok()
        .and_then(|idx| Month::iter().nth(idx))
        .map(|month| month.abbreviation().to_string())
        .unwrap_or_default()
}

fn draw_bars(
    consumption: &MonthlyConsumption,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let max_kwh = consumption
        .iter()
        .map(|(_, kwh)| kwh)
        .fold(0., f64::max);
    // leave headroom above the tallest bar, and keep a usable axis when everything is zero
    let y_max = if max_kwh > 0. { max_kwh * 1.1 } else { 1. };

    // bars are centred on whole numbers so each tick sits under its month
    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Energy Consumption (kWh)", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..11.5f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Month")
        .y_desc("Consumption (kWh)")
        .x_labels(12)
        .x_label_formatter(&month_label)
        .draw()?;

    chart.draw_series(consumption.iter().map(|(month, kwh)| {
        let centre = month.index() as f64;
        Rectangle::new([(centre - 0.4, 0.), (centre + 0.4, kwh)], SKY_BLUE.filled())
    }))?;

    root.present()?;
    Ok(())
}
