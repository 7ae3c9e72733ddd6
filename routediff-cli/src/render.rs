//! Text and JSON rendering of a comparison.

use std::io::Write;

use routediff_core::Comparison;

use crate::CliError;
use crate::settings::OutputFormat;

/// Three lines: both distances in km, then the weighted differential.
///
/// ```text
/// OVBA Distance: 12.34 km
/// OBAB Distance: 13.10 km
/// OBAB - 1.0 × OVBA = +0.76 km
/// ```
pub(crate) fn render_text(comparison: &Comparison) -> String {
    format!(
        "OVBA Distance: {:.2} km\nOBAB Distance: {:.2} km\nOBAB - {:.1} × OVBA = {} km\n",
        kilometres(comparison.ovba().distance_m()),
        kilometres(comparison.obab().distance_m()),
        comparison.multiplier().get(),
        signed_kilometres(comparison.differential_m()),
    )
}

pub(crate) fn write_comparison(
    writer: &mut dyn Write,
    comparison: &Comparison,
    format: OutputFormat,
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Text => render_text(comparison),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(comparison)
                .map_err(CliError::SerialiseComparison)?;
            json.push('\n');
            json
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)
}

#[expect(clippy::float_arithmetic, reason = "unit conversion")]
fn kilometres(metres: f64) -> f64 {
    metres / 1000.0
}

/// Two decimals with a `+` on positive values; never `-0.00`.
#[expect(clippy::float_arithmetic, reason = "rounding to the displayed precision")]
fn signed_kilometres(metres: f64) -> String {
    // Adding zero turns -0.0 into 0.0.
    let rounded = (kilometres(metres) * 100.0).round() / 100.0 + 0.0;
    if rounded > 0.0 {
        format!("+{rounded:.2}")
    } else {
        format!("{rounded:.2}")
    }
}
