//! Charts written next to the results of a run.

use anyhow::Result;
use lcaforge_schemas::{
    factors::FactorTables,
    material::MaterialType,
    results::{LcaResults, LifecycleStage},
};
use plotters::prelude::*;
use std::path::Path;

/// Renders the stage breakdown chart for every assessed product and one
/// factor comparison chart for the run.
pub fn generate_all_plots(
    output_dir: &Path,
    runs: &[(String, LcaResults)],
    factors: &FactorTables,
) -> Result<()> {
    println!("[Plotting] Generating charts...");

    for (product_id, results) in runs {
        let path = output_dir.join(format!("{}_stage_breakdown.png", file_stem(product_id)));
        plot_stage_breakdown(&path, product_id, results)?;
    }
    plot_material_factors(&output_dir.join("material_carbon_factors.png"), factors)?;

    println!("[Plotting] Charts have been saved to '{}'.", output_dir.display());
    Ok(())
}

fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Upper bound of a value axis, leaving headroom and never collapsing to zero.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Bar chart of kg CO2e per life-cycle stage.
pub fn plot_stage_breakdown(path: &Path, product_id: &str, results: &LcaResults) -> Result<()> {
    let stages = &results.carbon_footprint_by_stage;
    let values: Vec<(LifecycleStage, f64)> =
        LifecycleStage::ALL.iter().map(|s| (*s, stages.get(*s))).collect();
    let y_max = axis_max(values.iter().map(|(_, v)| *v));

    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = format!(
        "Carbon Footprint by Stage: {} ({:.2} kg CO2e)",
        product_id, results.total_carbon_footprint
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..values.len() as f64, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(values.len())
        .x_label_formatter(&|x| {
            LifecycleStage::ALL
                .get(x.floor() as usize)
                .map(|s| s.label().to_string())
                .unwrap_or_default()
        })
        .x_desc("Life-cycle stage")
        .y_desc("kg CO2e")
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, (_, value))| {
        let x = i as f64;
        Rectangle::new([(x + 0.15, 0.0), (x + 0.85, *value)], Palette99::pick(i).filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Grouped bars of the raw and recycled carbon factor of every material type.
pub fn plot_material_factors(path: &Path, factors: &FactorTables) -> Result<()> {
    let rows: Vec<(MaterialType, f64, f64)> = MaterialType::ALL
        .iter()
        .filter_map(|m| {
            let row = factors.materials.get(m)?;
            Some((*m, row.raw.carbon, row.recycled.carbon))
        })
        .collect();
    if rows.is_empty() {
        println!("[Plotting] Warning: No material factors to plot.");
        return Ok(());
    }
    let y_max = axis_max(rows.iter().map(|(_, raw, _)| *raw));

    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Carbon Factors: Raw vs Recycled", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..rows.len() as f64, 0.0..y_max)?;

    let labels: Vec<String> = rows.iter().map(|(m, _, _)| m.to_string()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|x| labels.get(x.floor() as usize).cloned().unwrap_or_default())
        .x_desc("Material")
        .y_desc("kg CO2e per kg")
        .draw()?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, (_, raw, _))| {
            let x = i as f64;
            Rectangle::new([(x + 0.1, 0.0), (x + 0.5, *raw)], RED.mix(0.7).filled())
        }))?
        .label("Raw")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RED.mix(0.7).filled()));

    chart
        .draw_series(rows.iter().enumerate().map(|(i, (_, _, recycled))| {
            let x = i as f64;
            Rectangle::new([(x + 0.5, 0.0), (x + 0.9, *recycled)], GREEN.mix(0.7).filled())
        }))?
        .label("Recycled")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], GREEN.mix(0.7).filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_never_collapses() {
        assert_eq!(axis_max(std::iter::empty()), 1.0);
        assert_eq!(axis_max([0.0, 0.0].into_iter()), 1.0);
        assert!((axis_max([2.0, 10.0].into_iter()) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn file_stems_are_path_safe() {
        assert_eq!(file_stem("alu/can 01"), "alu_can_01");
    }
}
