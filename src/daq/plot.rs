use std::io::Cursor;
use std::time::SystemTime;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use ndarray::Array1;
use plotters::prelude::*;
use crate::daq::error::DaqError;
use crate::daq::session::Reading;
use crate::daq::waveform::WaveformProfile;
use crate::daq::SensorRange;
// Plots carry no text so they render without a font backend.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub trace: RGBColor,
    pub limits: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            trace: CYAN,
            limits: RED,
        }
    }
}
/// Ideal trace of `profile` over `[0, seconds]`, drawn against the
/// sensor limits of `range`.
pub fn render_profile_png(
    profile: &WaveformProfile,
    seconds: f64,
    range: &SensorRange,
    style: PlotStyle,
) -> Result<Vec<u8>, DaqError> {
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(DaqError::Plot(format!(
            "profile duration must be > 0, got {seconds}"
        )));
    }
    let steps = (style.width as usize).max(2);
    let times = Array1::linspace(0.0, seconds, steps);
    let volts = profile.voltages(&times);
    let points: Vec<(f64, f64)> = times.iter().copied().zip(volts.iter().copied()).collect();
    render_series(&points, seconds, range, &style)
}
/// Reading codes converted back to volts, plotted against seconds since the
/// first reading.
pub fn render_readings_png(
    readings: &[Reading],
    range: &SensorRange,
    style: PlotStyle,
) -> Result<Vec<u8>, DaqError> {
    let Some(first) = readings.first() else {
        return Err(DaqError::Plot("no readings to plot".into()));
    };
    let points: Vec<(f64, f64)> = readings
        .iter()
        .map(|r| {
            (
                seconds_between(first.timestamp, r.timestamp),
                range.code_to_volts(r.code),
            )
        })
        .collect();
    let span = points.last().map(|p| p.0).unwrap_or(0.0).max(1.0);
    render_series(&points, span, range, &style)
}
fn seconds_between(start: SystemTime, end: SystemTime) -> f64 {
    end.duration_since(start)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
fn render_series(
    points: &[(f64, f64)],
    x_max: f64,
    range: &SensorRange,
    style: &PlotStyle,
) -> Result<Vec<u8>, DaqError> {
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let margin = (range.ref_high() - range.ref_low()) * 0.05;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(
                0f64..x_max,
                (range.ref_low() - margin)..(range.ref_high() + margin),
            )?;
        for limit in [range.ref_low(), range.ref_high()] {
            chart.draw_series(LineSeries::new(
                vec![(0.0, limit), (x_max, limit)],
                &style.limits,
            ))?;
        }
        chart.draw_series(LineSeries::new(points.iter().copied(), &style.trace))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, DaqError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| DaqError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
