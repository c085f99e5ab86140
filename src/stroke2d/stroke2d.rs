use anyhow::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use nalgebra::base::*;

use crate::geometry::geometry_objects::{BoundingBox, CircleFitResult, Point};

/// Points of one gesture attempt, in the order they were drawn
#[derive(Clone, Debug, Default)]
pub struct Stroke2d {
    pub points: Vec<Point>,
}

impl Stroke2d {
    pub fn new() -> Stroke2d {
        Stroke2d{
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, pt: Point) -> () {
        self.points.push(pt);
    }

    pub fn clear(&mut self) -> () {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }

    /// Reads a stroke stored as one `x y` pair per line.
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_txt(stroke_in_path: &str) -> Result<Stroke2d> {
        let file = File::open(stroke_in_path)?;
        let reader = BufReader::new(file);

        let mut stroke = Stroke2d::new();
        for (num, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let coords = trimmed
                .split_whitespace()
                .map(|s| s.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| anyhow::Error::msg(format!("Line {}: {}", num + 1, e)))?;

            match coords.as_slice() {
                &[x, y] if x.is_finite() && y.is_finite() => stroke.push(Vector2::<f32>::new(x, y)),
                _ => return Err(anyhow::Error::msg(format!("Line {}: expected two finite coordinates", num + 1))),
            }
        }

        Ok(stroke)
    }

    pub fn export_txt(&self, stroke_out_path: &str) -> Result<()> {
        let mut writer = BufWriter::new(File::create(stroke_out_path)?);
        for pt in self.points.iter() {
            writeln!(writer, "{} {}", pt[0], pt[1])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Writes `cx cy radius error is_circle` on a single line
pub fn export_fit_txt(fit: &CircleFitResult, is_circle: bool, fit_out_path: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(fit_out_path)?);
    writeln!(writer, "{} {} {} {} {}", fit.center[0], fit.center[1], fit.radius, fit.error, is_circle)?;
    writer.flush()?;
    Ok(())
}
