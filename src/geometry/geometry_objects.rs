use nalgebra::base::*;

/// 2D point, in whatever frame the caller normalized its touches to
pub type Point = Vector2<f32>;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle{
    pub center: Point,
    pub radius: f32,
}

impl Circle{
    pub fn new(center: Point, radius: f32) -> Circle {
        Circle{
            center,
            radius,
        }
    }

    /// Axis aligned box enclosing the circle (center ± radius on each axis)
    pub fn bounding_box(&self) -> BoundingBox {
        let half = Vector2::<f32>::new(self.radius, self.radius);
        BoundingBox{
            min: self.center - half,
            max: self.center + half,
        }
    }
}

/// Axis aligned bounding box, `min` is the top-left corner and `max` the bottom-right one
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox{
    pub min: Point,
    pub max: Point,
}

impl BoundingBox{
    pub fn from_points(points: &[Point]) -> Option<BoundingBox> {
        points
            .iter()
            .fold(None,
                  |bbox: Option<BoundingBox>, v|
                  {
                      match bbox {
                          Some(b) => {
                              let min_x = if b.min[0] < v[0] {b.min[0]} else {v[0]};
                              let min_y = if b.min[1] < v[1] {b.min[1]} else {v[1]};
                              let max_x = if b.max[0] > v[0] {b.max[0]} else {v[0]};
                              let max_y = if b.max[1] > v[1] {b.max[1]} else {v[1]};
                              Some(BoundingBox{
                                  min: Vector2::<f32>::new(min_x, min_y),
                                  max: Vector2::<f32>::new(max_x, max_y),
                              })
                          },
                          None => Some(BoundingBox{min: *v, max: *v}),
                      }
                  }
                 )
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Overlapping part of both boxes, `None` when they do not overlap
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min = Vector2::<f32>::new(self.min[0].max(other.min[0]), self.min[1].max(other.min[1]));
        let max = Vector2::<f32>::new(self.max[0].min(other.max[0]), self.max[1].min(other.max[1]));

        if min[0] <= max[0] && min[1] <= max[1] {
            Some(BoundingBox{min, max})
        }
        else {
            None
        }
    }

    pub fn contains(&self, pt: &Point) -> bool {
        pt[0] >= self.min[0] && pt[0] <= self.max[0] && pt[1] >= self.min[1] && pt[1] <= self.max[1]
    }
}

/// Outcome of a circle fit over a stroke.
///
/// `error` is the RMS distance of the points to the fitted perimeter divided
/// by the radius. The default value (origin, zero radius, zero error) stands
/// for "no fit ran yet".
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CircleFitResult{
    pub center: Point,
    pub radius: f32,
    pub error: f32,
}

impl Default for CircleFitResult {
    fn default() -> Self {
        CircleFitResult{
            center: Vector2::<f32>::zeros(),
            radius: 0.0,
            error: 0.0,
        }
    }
}

impl CircleFitResult{
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}
