use anyhow::Result;
use std::sync::mpsc::Sender;

use crate::geometry::geometry_objects::{CircleFitResult, Point};
use crate::geometry::geometry_operations::fit_circle;
use crate::recognizer::acceptance::{check_acceptance, AcceptanceReport};
use crate::recognizer::recognizer_config::RecognizerConfig;
use crate::stroke2d::stroke2d::Stroke2d;

/// Lifecycle of one gesture attempt.
///
/// `Possible` → `Began` → `Changed`* → one of `Ended`, `Failed`, `Cancelled`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Possible,
    Began,
    Changed,
    Ended,
    Failed,
    Cancelled,
}

impl GesturePhase {
    pub fn is_active(self) -> bool {
        matches!(self, GesturePhase::Began | GesturePhase::Changed)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GesturePhase::Ended | GesturePhase::Failed | GesturePhase::Cancelled)
    }
}

/// Input driving the recognizer, points already in a single coordinate frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent {
    Begin {
        touch_count: usize,
        first: Option<Point>,
    },
    Move(Point),
    End,
    Cancel,
    Reset,
}

/// State handed to the observer after each handled event
#[derive(Copy, Clone, Debug)]
pub struct GestureUpdate<'a> {
    pub phase: GesturePhase,
    pub fit_result: CircleFitResult,
    pub is_circle: bool,
    pub path: &'a [Point],
}

/// Owned copy of a [`GestureUpdate`], for observers living on another thread
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSnapshot {
    pub phase: GesturePhase,
    pub fit_result: CircleFitResult,
    pub is_circle: bool,
    pub path: Vec<Point>,
}

impl<'a> GestureUpdate<'a> {
    pub fn snapshot(&self) -> GestureSnapshot {
        GestureSnapshot{
            phase: self.phase,
            fit_result: self.fit_result,
            is_circle: self.is_circle,
            path: self.path.to_vec(),
        }
    }
}

pub trait GestureObserver {
    fn on_phase_change(&mut self, update: &GestureUpdate);
}

impl<F> GestureObserver for F
where
    F: FnMut(&GestureUpdate),
{
    fn on_phase_change(&mut self, update: &GestureUpdate) {
        self(update)
    }
}

impl GestureObserver for Sender<GestureSnapshot> {
    fn on_phase_change(&mut self, update: &GestureUpdate) {
        if self.send(update.snapshot()).is_err() {
            log::trace!("Gesture receiver dropped, update lost");
        }
    }
}

/// Narrow touch interface a host translates its native events into
pub trait TouchInput {
    fn begin(&mut self, touch_count: usize, first: Option<Point>);
    fn move_to(&mut self, pt: Point);
    fn end(&mut self);
    fn cancel(&mut self);
}

/// Recognizes a single finger stroke drawn as a circle.
///
/// Points are accumulated while the touch is active. When it ends, a circle
/// is fitted to the stroke and the acceptance checks decide between `Ended`
/// (circle) and `Failed`. Every handled event is reported to the observer,
/// except a reset of an already idle recognizer.
pub struct CircleRecognizer {
    config: RecognizerConfig,
    phase: GesturePhase,
    stroke: Stroke2d,
    fit_result: CircleFitResult,
    acceptance: Option<AcceptanceReport>,
    is_circle: bool,
    observer: Option<Box<dyn GestureObserver + Send>>,
}

impl Default for CircleRecognizer {
    fn default() -> Self {
        CircleRecognizer::with_config(RecognizerConfig::default())
    }
}

impl CircleRecognizer {
    pub fn new() -> CircleRecognizer {
        CircleRecognizer::default()
    }

    pub fn with_config(config: RecognizerConfig) -> CircleRecognizer {
        CircleRecognizer{
            config,
            phase: GesturePhase::Possible,
            stroke: Stroke2d::new(),
            fit_result: CircleFitResult::default(),
            acceptance: None,
            is_circle: false,
            observer: None,
        }
    }

    pub fn set_observer<O>(&mut self, observer: O) -> ()
    where
        O: GestureObserver + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) -> () {
        self.observer = None;
    }

    /// Changes the tolerance, used from the next end of touch on
    pub fn configure(&mut self, tolerance: f32) -> Result<()> {
        self.config = self.config.with_tolerance(tolerance)?;
        Ok(())
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn fit_result(&self) -> CircleFitResult {
        self.fit_result
    }

    pub fn is_circle(&self) -> bool {
        self.is_circle
    }

    /// Check details of the last fitted stroke, `None` until a fit ran
    pub fn acceptance(&self) -> Option<AcceptanceReport> {
        self.acceptance
    }

    pub fn path(&self) -> &[Point] {
        &self.stroke.points
    }

    pub fn reset(&mut self) -> () {
        self.handle(GestureEvent::Reset);
    }

    /// Applies one event. Events that make no sense in the current phase
    /// (late moves after a failure, end without begin...) are dropped.
    pub fn handle(&mut self, event: GestureEvent) -> () {
        let prev = self.phase;

        let next = match (prev, event) {
            (GesturePhase::Failed, GestureEvent::Move(_)) => {
                log::trace!("Dropping move received after failure");
                return;
            }
            (GesturePhase::Possible, GestureEvent::Reset) => {
                return;
            }
            (_, GestureEvent::Reset) => {
                self.clear_attempt();
                GesturePhase::Possible
            }
            (phase, GestureEvent::Begin { .. }) if phase.is_active() => {
                log::debug!("Extra touch during stroke, failing");
                self.is_circle = false;
                GesturePhase::Failed
            }
            (phase, GestureEvent::Begin { touch_count, first }) if phase == GesturePhase::Possible || phase.is_terminal() => {
                self.clear_attempt();
                if touch_count != 1 {
                    log::debug!("Stroke started with {} touches, failing", touch_count);
                    GesturePhase::Failed
                }
                else {
                    match first {
                        Some(pt) if is_finite_point(&pt) => self.stroke.push(pt),
                        Some(pt) => log::trace!("Dropping non finite first sample {:?}", pt),
                        None => (),
                    }
                    GesturePhase::Began
                }
            }
            (GesturePhase::Began | GesturePhase::Changed, GestureEvent::Move(pt)) if !is_finite_point(&pt) => {
                log::trace!("Dropping non finite sample {:?}", pt);
                return;
            }
            (GesturePhase::Began | GesturePhase::Changed, GestureEvent::Move(pt)) => {
                self.stroke.push(pt);
                GesturePhase::Changed
            }
            (GesturePhase::Began | GesturePhase::Changed, GestureEvent::End) => {
                self.finish()
            }
            (GesturePhase::Began | GesturePhase::Changed, GestureEvent::Cancel) => {
                self.is_circle = false;
                GesturePhase::Cancelled
            }
            (phase, event) => {
                log::trace!("Ignoring {:?} in phase {:?}", event, phase);
                return;
            }
        };

        if next != prev {
            log::debug!("Gesture phase {:?} -> {:?} ({} points)", prev, next, self.stroke.len());
        }
        self.phase = next;
        self.notify();
    }

    fn finish(&mut self) -> GesturePhase {
        if self.stroke.len() < self.config.min_points {
            log::debug!("Stroke too short to fit ({} points, {} needed)", self.stroke.len(), self.config.min_points);
            self.is_circle = false;
            return GesturePhase::Failed;
        }

        self.fit_result = fit_circle(&self.stroke.points);
        log::debug!(
            "Fitted circle center ({}, {}) radius {} error {}",
            self.fit_result.center[0],
            self.fit_result.center[1],
            self.fit_result.radius,
            self.fit_result.error
        );

        let report = check_acceptance(&self.fit_result, &self.stroke.points, self.config.tolerance);
        self.acceptance = Some(report);
        self.is_circle = report.is_circle;

        if self.is_circle {
            GesturePhase::Ended
        }
        else {
            GesturePhase::Failed
        }
    }

    fn clear_attempt(&mut self) -> () {
        self.stroke.clear();
        self.fit_result = CircleFitResult::default();
        self.acceptance = None;
        self.is_circle = false;
    }

    fn notify(&mut self) -> () {
        if let Some(observer) = self.observer.as_mut() {
            let update = GestureUpdate{
                phase: self.phase,
                fit_result: self.fit_result,
                is_circle: self.is_circle,
                path: &self.stroke.points,
            };
            observer.on_phase_change(&update);
        }
    }
}

fn is_finite_point(pt: &Point) -> bool {
    pt[0].is_finite() && pt[1].is_finite()
}

impl TouchInput for CircleRecognizer {
    fn begin(&mut self, touch_count: usize, first: Option<Point>) {
        self.handle(GestureEvent::Begin { touch_count, first });
    }

    fn move_to(&mut self, pt: Point) {
        self.handle(GestureEvent::Move(pt));
    }

    fn end(&mut self) {
        self.handle(GestureEvent::End);
    }

    fn cancel(&mut self) {
        self.handle(GestureEvent::Cancel);
    }
}
