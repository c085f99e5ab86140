use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger;
use log;

use nalgebra::base::*;

use circle_gesture_2d::stroke2d::stroke2d::Stroke2d;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Shape {
    Circle,
    Arc,
    Zigzag,
}

#[derive(Parser)]
struct Cli {
    #[arg(value_enum, default_value = "circle", long = "shape")]
    shape: Shape,

    #[arg(default_value = "100", long = "cx")]
    cx: f32,

    #[arg(default_value = "100", long = "cy")]
    cy: f32,

    #[arg(default_value = "50", long = "radius")]
    radius: f32,

    #[arg(default_value = "36", long = "samples")]
    samples: usize,

    /// Swept angle of arcs, in degrees
    #[arg(default_value = "90", long = "sweep")]
    sweep: f32,

    /// Radial wobble, as a fraction of the radius
    #[arg(default_value = "0.0", long = "wobble")]
    wobble: f32,

    #[arg(default_value = "./ressources/stroke.txt", long = "strokeout")]
    stroke_out_path: std::path::PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let stroke_out_path_str = args.stroke_out_path.to_str().unwrap_or("");
    if args.samples < 2 {
        return Err(anyhow::Error::msg("At least two samples are needed"));
    }

    let nb = args.samples;
    let rad_at = |theta: f32| args.radius * (1.0 + args.wobble * (5.0 * theta).sin());

    let points: Vec<Vector2<f32>> = match args.shape {
        Shape::Circle => (0..nb)
            .map(|i| {
                let theta = 2.0 * std::f32::consts::PI * i as f32 / nb as f32;
                Vector2::new(args.cx + rad_at(theta) * theta.cos(), args.cy + rad_at(theta) * theta.sin())
            })
            .collect(),
        Shape::Arc => (0..nb)
            .map(|i| {
                let theta = args.sweep.to_radians() * i as f32 / (nb - 1) as f32;
                Vector2::new(args.cx + rad_at(theta) * theta.cos(), args.cy + rad_at(theta) * theta.sin())
            })
            .collect(),
        // star-like path bouncing between the perimeter and the center
        Shape::Zigzag => (0..nb)
            .map(|i| {
                let theta = 2.0 * std::f32::consts::PI * i as f32 / nb as f32;
                let rad = if i % 2 == 0 { args.radius } else { 0.0 };
                Vector2::new(args.cx + rad * theta.cos(), args.cy + rad * theta.sin())
            })
            .collect(),
    };

    let stroke = Stroke2d{points};
    log::info!("Writing {:?} stroke of {} points", args.shape, stroke.len());
    stroke.export_txt(stroke_out_path_str)?;

    Ok(())
}
