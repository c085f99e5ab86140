use anyhow::Result;
use clap::Parser;
use env_logger;
use log;
use std::time::Instant;

use circle_gesture_2d::recognizer::circle_recognizer::{CircleRecognizer, GestureUpdate, TouchInput};
use circle_gesture_2d::recognizer::recognizer_config::RecognizerConfig;
use circle_gesture_2d::stroke2d::stroke2d::{self, Stroke2d};

#[derive(Parser)]
struct Cli {
    #[arg(default_value = "./ressources/stroke.txt", long = "strokein")]
    stroke_in_path: std::path::PathBuf,

    #[arg(default_value = "0.2", long = "tolerance")]
    tolerance: f32,

    #[arg(default_value = "3", long = "minpoints")]
    min_points: usize,

    #[arg(long = "fitout")]
    fit_out_path: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let stroke_in_path_str = args.stroke_in_path.to_str().unwrap_or("");
    let config = RecognizerConfig::new(args.tolerance, args.min_points)?;

    log::info!("Loading stroke");
    let stroke = Stroke2d::from_txt(stroke_in_path_str)?;
    log::info!("{} points loaded", stroke.len());

    let mut recognizer = CircleRecognizer::with_config(config);
    recognizer.set_observer(|update: &GestureUpdate| {
        log::info!("Phase {:?} ({} points)", update.phase, update.path.len());
    });

    let now = Instant::now();
    let mut pts = stroke.points.iter();
    recognizer.begin(1, pts.next().copied());
    for pt in pts {
        recognizer.move_to(*pt);
    }
    recognizer.end();
    let duration = now.elapsed();
    log::info!("Stroke recognized in {}us", duration.as_micros());

    let fit = recognizer.fit_result();
    println!("phase: {:?}", recognizer.phase());
    println!("center: ({}, {})", fit.center[0], fit.center[1]);
    println!("radius: {}", fit.radius);
    println!("error: {}", fit.error);
    if let Some(report) = recognizer.acceptance() {
        println!("inside points: {}", report.has_inside_points);
        println!("overlap ratio: {}", report.overlap_ratio);
    }
    println!("circle: {}", recognizer.is_circle());

    if let Some(fit_out_path) = args.fit_out_path {
        let fit_out_path_str = fit_out_path.to_str().unwrap_or("");
        stroke2d::export_fit_txt(&fit, recognizer.is_circle(), fit_out_path_str)?;
    }

    Ok(())
}
