//! Plotting of training artifacts

use std::error::Error;

use plotters::{
    chart::ChartBuilder,
    prelude::{BitMapBackend, IntoDrawingArea, Rectangle},
    series::LineSeries,
    style::{BLUE, Color, RED, WHITE},
};

/// Renders a class-probability vector as a bar chart, one bar per class
pub fn plot_probabilities(probs: &[f32], file_name: &str) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(file_name, (640, 480)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption("Class probabilities", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(0f32..probs.len() as f32, 0f32..1f32)?;

    chart.configure_mesh().x_desc("class").y_desc("p").draw()?;

    chart.draw_series(probs.iter().enumerate().map(|(class, p)| {
        Rectangle::new(
            [(class as f32 + 0.1, 0.0), (class as f32 + 0.9, *p)],
            BLUE.filled(),
        )
    }))?;

    root_area.present()?;
    log::info!("Probability plot saved to '{}'.", file_name);
    Ok(())
}

/// Plots the mean loss of each epoch as a line chart
pub fn plot_loss_curve(epoch_losses: &[f32], file_name: &str) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(file_name, (640, 480)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let max_loss = epoch_losses.iter().copied().fold(f32::EPSILON, f32::max);
    let mut chart = ChartBuilder::on(&root_area)
        .caption("Mean loss per epoch", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(1f32..epoch_losses.len().max(2) as f32, 0f32..max_loss)?;

    chart
        .configure_mesh()
        .x_desc("epoch")
        .y_desc("mean loss")
        .draw()?;

    chart.draw_series(LineSeries::new(
        epoch_losses
            .iter()
            .enumerate()
            .map(|(epoch, loss)| ((epoch + 1) as f32, *loss)),
        &RED,
    ))?;

    root_area.present()?;
    log::info!("Loss curve saved to '{}'.", file_name);
    Ok(())
}
