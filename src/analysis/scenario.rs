//! Scenario driver: one mirror, one sun, and the derived metrics.

use tracing::{debug, info};

use crate::error::{AnalysisError, ConfigError, Result};
use crate::geometry::{MirrorArc, Segment};
use crate::math::angle::normalize_angle;
use crate::math::intersect_2d::intersect_rays;
use crate::math::point_2d::distance;
use crate::math::{is_defined, Point2, UNDEFINED};
use crate::trace::{search_arc_for_sun, trace_concave, ConvexMirror, ConvexSolution, TracedRay};

use super::BoundingBox;

/// Which side of the circle is reflective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorKind {
    Concave,
    Convex,
}

/// Full description of one simulation: the mirror, the sun, and any
/// scene geometry the rays interact with.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Mirror radius; the center of curvature is the origin.
    pub radius: f64,
    /// Normal direction at the lower edge of the arc, degrees.
    pub min_normal_dir: f64,
    /// Normal direction at the upper edge of the arc, degrees.
    pub max_normal_dir: f64,
    /// Travel direction of sunlight, degrees.
    pub sun_dir: f64,
    /// Angular diameter of the sun, degrees.
    pub sun_width: f64,
    pub kind: MirrorKind,
    /// Observer distance along the +X axis, for convex runs.
    pub observer_distance: Option<f64>,
    /// Opaque screen that reflected rays terminate on.
    pub screen: Option<Segment>,
    /// Stencil edges whose endpoints seed the inverse search.
    pub stencils: Vec<Segment>,
    /// Extra scene points that seed the inverse search.
    pub target_points: Vec<Point2>,
}

impl Scenario {
    /// A concave scenario with the default half-degree sun and a full
    /// circular sweep.
    #[must_use]
    pub fn new(radius: f64, sun_dir: f64) -> Self {
        Self {
            radius,
            min_normal_dir: 0.0,
            max_normal_dir: 360.0,
            sun_dir,
            sun_width: 0.5,
            kind: MirrorKind::Concave,
            observer_distance: None,
            screen: None,
            stencils: Vec::new(),
            target_points: Vec::new(),
        }
    }

    /// Checks the configuration before a run.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero or negative radius.
    pub fn validate(&self) -> Result<()> {
        if self.radius == 0.0 {
            return Err(ConfigError::ZeroRadius.into());
        }
        if self.radius < 0.0 {
            return Err(ConfigError::NegativeRadius(self.radius).into());
        }
        Ok(())
    }

    /// Runs the scenario and returns its immutable result.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid.
    pub fn evaluate(&self, options: &EvalOptions) -> Result<ScenarioResult> {
        self.validate()?;
        match self.kind {
            MirrorKind::Concave => self.evaluate_concave(options),
            MirrorKind::Convex => self.evaluate_convex(options),
        }
    }

    fn evaluate_concave(&self, options: &EvalOptions) -> Result<ScenarioResult> {
        let arc = MirrorArc::new(self.radius, self.min_normal_dir, self.max_normal_dir)?;
        let mut result = ScenarioResult::new(self.clone(), &arc);

        if options.rays == 0 {
            self.trace_reverse(&arc, &mut result);
        } else {
            self.trace_forward(&arc, options.rays, &mut result);
        }

        let (top_pts, top_bbox) = collect_intersections(&result.top_rays);
        let (bot_pts, bot_bbox) = collect_intersections(&result.bot_rays);
        result.top_intersections = top_pts;
        result.bot_intersections = bot_pts;
        result.top_bbox = top_bbox;
        result.bot_bbox = bot_bbox;

        result.obscured_count = result
            .top_rays
            .iter()
            .chain(&result.bot_rays)
            .filter(|ray| ray.status.is_blocked())
            .count();

        fold_beam_metrics(&arc, &mut result);

        info!(
            top = result.top_rays.len(),
            bot = result.bot_rays.len(),
            focal = result.focal_distance,
            "concave run complete"
        );
        Ok(result)
    }

    /// Forward mode: march `rays` evenly spaced strike normals across
    /// the arc, tracing both sun edges at each one.
    fn trace_forward(&self, arc: &MirrorArc, rays: usize, result: &mut ScenarioResult) {
        let steps = rays.saturating_sub(1);
        let step_size = if steps == 0 {
            0.0
        } else {
            arc.width() / steps as f64
        };
        let half_width = self.sun_width / 2.0;

        for step in 0..=steps {
            let normal_dir = self.min_normal_dir + step as f64 * step_size;
            let mirror_pt = arc.point_at_normal(normal_dir);
            if let Some(ray) = trace_sun_edge(arc, self.sun_dir + half_width, &mirror_pt) {
                result.top_rays.push(ray);
            }
            if let Some(ray) = trace_sun_edge(arc, self.sun_dir - half_width, &mirror_pt) {
                result.bot_rays.push(ray);
            }
        }
    }

    /// Reverse mode: from every stencil endpoint and target point,
    /// search the arc for strikes that reflect each sun edge there.
    fn trace_reverse(&self, arc: &MirrorArc, result: &mut ScenarioResult) {
        let seeds: Vec<Point2> = self
            .stencils
            .iter()
            .flat_map(|s| [s.a, s.b])
            .chain(self.target_points.iter().copied())
            .collect();
        let half_width = self.sun_width / 2.0;

        for (edge_offset, rays) in [
            (half_width, &mut result.top_rays),
            (-half_width, &mut result.bot_rays),
        ] {
            let sun_edge_dir = self.sun_dir + edge_offset;
            let reversed = normalize_angle(sun_edge_dir + 180.0);
            // Only normals within a quarter turn of the sun edge can
            // produce a single-bounce match.
            let window_min = self.min_normal_dir.max(sun_edge_dir - 90.0);
            let window_max = self.max_normal_dir.min(sun_edge_dir + 90.0);
            if window_min >= window_max {
                debug!(sun_edge_dir, "empty search window");
                continue;
            }
            for seed in &seeds {
                search_arc_for_sun(arc, seed, reversed, window_min, window_max, rays);
            }
        }
    }

    fn evaluate_convex(&self, options: &EvalOptions) -> Result<ScenarioResult> {
        let arc = MirrorArc::new(self.radius, self.min_normal_dir, self.max_normal_dir)?;
        let mut result = ScenarioResult::new(self.clone(), &arc);

        let observer_distance = self.observer_distance.unwrap_or(DEFAULT_OBSERVER_DISTANCE);
        let observer = Point2::new(observer_distance, 0.0);
        let mirror = ConvexMirror::new(self.radius, observer)?;
        result.observer_distance = observer_distance;

        result.tangent = Some(TangentInfo {
            normal_dir: mirror.tangent_normal_dir(),
            observer_dir: mirror.observer_tangent_dir(),
            point: mirror.tangent_point(),
        });

        result.sun_mid = mirror.find_normal_for_sky(self.sun_dir);
        if let Some(mid) = result.sun_mid {
            let half_width = self.sun_width / 2.0;
            result.sun_bot = mirror.find_normal_for_sky(mid.sky_dir - half_width);
            result.sun_top = mirror.find_normal_for_sky(mid.sky_dir + half_width);

            if options.pupil {
                self.fold_pupil_metrics(&mirror, &mid, &mut result);
            }
        } else {
            debug!(sun_dir = self.sun_dir, "sun is not visible in the mirror");
        }

        info!(
            solved = result.sun_mid.is_some(),
            brightness = result.brightness,
            "convex run complete"
        );
        Ok(result)
    }

    /// Entrance and exit pupils of the sun's image, and the two
    /// brightness ratios built from them.
    fn fold_pupil_metrics(
        &self,
        mirror: &ConvexMirror,
        mid: &ConvexSolution,
        result: &mut ScenarioResult,
    ) {
        use crate::geometry::reflect::{apparent_width, apparent_width_angle};

        let (Some(bot), Some(top)) = (result.sun_bot, result.sun_top) else {
            debug!("sun edges did not both solve, skipping pupil metrics");
            return;
        };

        result.pupil_entrance = apparent_width(&top.mirror_point, &bot.mirror_point, self.sun_dir);
        result.pupil_exit =
            apparent_width(&top.mirror_point, &bot.mirror_point, mid.observer_dir);
        if result.pupil_exit != 0.0 {
            result.brightness = result.pupil_entrance / result.pupil_exit;
        }
        if self.sun_width != 0.0 {
            result.brightness2 =
                apparent_width_angle(&top.mirror_point, &bot.mirror_point, mirror.observer())
                    / self.sun_width;
        }
    }
}

/// Default observer distance when a convex scenario does not set one.
const DEFAULT_OBSERVER_DISTANCE: f64 = 2.0;

/// Knobs for one evaluation run.
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    /// Forward rays per sun edge; zero switches to the reverse search.
    pub rays: usize,
    /// Compute pupil and brightness metrics on convex runs.
    pub pupil: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            rays: 3,
            pupil: false,
        }
    }
}

/// Observer sight-line grazing geometry for a convex run.
#[derive(Debug, Clone, Copy)]
pub struct TangentInfo {
    pub normal_dir: f64,
    pub observer_dir: f64,
    pub point: Point2,
}

/// Immutable outcome of one scenario evaluation.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// The configuration that produced this result.
    pub scenario: Scenario,

    /// Observer distance the run actually used; convex evaluation
    /// resolves the default here, concave runs report the input as-is.
    pub observer_distance: f64,

    /// Arc edge and middle points, for reporting.
    pub min_normal_point: Point2,
    pub max_normal_point: Point2,
    pub mid_arc_point: Point2,

    /// Rays traced from the upper sun edge.
    pub top_rays: Vec<TracedRay>,
    /// Rays traced from the lower sun edge.
    pub bot_rays: Vec<TracedRay>,
    pub top_intersections: Vec<Point2>,
    pub bot_intersections: Vec<Point2>,
    pub top_bbox: BoundingBox,
    pub bot_bbox: BoundingBox,
    pub obscured_count: usize,

    /// Angular width of the reflected beam, degrees.
    pub reflected_width: f64,
    /// Mean distance from the arc middle to the beam waist.
    pub focal_distance: f64,
    /// Mean diagonal of the two intersection clusters.
    pub blur: f64,

    /// Convex-only results.
    pub tangent: Option<TangentInfo>,
    pub sun_mid: Option<ConvexSolution>,
    pub sun_bot: Option<ConvexSolution>,
    pub sun_top: Option<ConvexSolution>,
    pub pupil_entrance: f64,
    pub pupil_exit: f64,
    pub brightness: f64,
    pub brightness2: f64,
}

impl ScenarioResult {
    fn new(scenario: Scenario, arc: &MirrorArc) -> Self {
        let observer_distance = scenario.observer_distance.unwrap_or(UNDEFINED);
        Self {
            scenario,
            observer_distance,
            min_normal_point: arc.min_point(),
            max_normal_point: arc.max_point(),
            mid_arc_point: arc.mid_point(),
            top_rays: Vec::new(),
            bot_rays: Vec::new(),
            top_intersections: Vec::new(),
            bot_intersections: Vec::new(),
            top_bbox: BoundingBox::new(),
            bot_bbox: BoundingBox::new(),
            obscured_count: 0,
            reflected_width: UNDEFINED,
            focal_distance: UNDEFINED,
            blur: UNDEFINED,
            tangent: None,
            sun_mid: None,
            sun_bot: None,
            sun_top: None,
            pupil_entrance: UNDEFINED,
            pupil_exit: UNDEFINED,
            brightness: UNDEFINED,
            brightness2: UNDEFINED,
        }
    }

    /// Looks up a result value by its report name.
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized name.
    pub fn metric(&self, name: &str) -> Result<f64> {
        let value = match name {
            "radius" => self.scenario.radius,
            "distance" => self.observer_distance,
            "sun_width" => self.scenario.sun_width,
            "sun_a" => self.scenario.sun_dir,
            "sun_A" => normalize_angle(self.scenario.sun_dir + 180.0),
            "min_normal" => self.scenario.min_normal_dir,
            "max_normal" => self.scenario.max_normal_dir,
            "mirror_width" => self.scenario.max_normal_dir - self.scenario.min_normal_dir,
            "ref_width" => {
                if self.obscured_count > 0 || !is_defined(self.reflected_width) {
                    UNDEFINED
                } else {
                    normalize_angle(self.reflected_width)
                }
            }
            "ref_width_p" => {
                if self.obscured_count > 0 || !is_defined(self.reflected_width) {
                    UNDEFINED
                } else {
                    100.0 * normalize_angle(self.reflected_width) / self.scenario.sun_width
                }
            }
            "ref_focal_d" => self.focal_distance,
            "ref_focal_p" => {
                if is_defined(self.focal_distance) {
                    100.0 * self.focal_distance / (self.scenario.radius / 2.0)
                } else {
                    UNDEFINED
                }
            }
            "ref_blur" => self.blur,
            "pupil" | "pupil1" => self.pupil_entrance,
            "pupil2" => self.pupil_exit,
            "brightness" => self.brightness,
            "brightness2" => self.brightness2,
            other => return Err(AnalysisError::UnknownMetric(other.to_owned()).into()),
        };
        Ok(value)
    }

    /// Materializes the escaping leg of every retained ray as a
    /// segment of length `reach`, terminated early on the scenario's
    /// screen when one is set.
    #[must_use]
    pub fn ray_segments(&self, reach: f64) -> Vec<Segment> {
        use crate::geometry::clip_ray;
        use crate::math::point_2d::project;

        self.top_rays
            .iter()
            .chain(&self.bot_rays)
            .filter_map(final_ray)
            .map(|(start, dir)| {
                let far = project(&start, dir, reach);
                let ray = Segment::new(start, far);
                match &self.scenario.screen {
                    Some(screen) => Segment::new(start, clip_ray(&ray, screen)),
                    None => ray,
                }
            })
            .collect()
    }
}

/// Width, focal distance and blur of the reflected beam, from the two
/// per-edge intersection clusters.
fn fold_beam_metrics(arc: &MirrorArc, result: &mut ScenarioResult) {
    let mid_arc = arc.mid_point();
    let (Some(top_mid), Some(bot_mid)) = (result.top_bbox.mid(), result.bot_bbox.mid()) else {
        return;
    };

    let top_dir = (top_mid.y - mid_arc.y)
        .atan2(top_mid.x - mid_arc.x)
        .to_degrees();
    let bot_dir = (bot_mid.y - mid_arc.y)
        .atan2(bot_mid.x - mid_arc.x)
        .to_degrees();
    result.reflected_width = (top_dir - bot_dir).abs();
    result.focal_distance = (distance(&mid_arc, &top_mid) + distance(&mid_arc, &bot_mid)) / 2.0;

    if let (Some(d1), Some(d2)) = (result.top_bbox.diagonal(), result.bot_bbox.diagonal()) {
        result.blur = (d1 + d2) / 2.0;
    }
}

/// Intersects every ordered pair of escaped rays and folds the
/// crossings into a bounding box.
fn collect_intersections(rays: &[TracedRay]) -> (Vec<Point2>, BoundingBox) {
    let mut crossings = Vec::new();
    let mut bbox = BoundingBox::new();

    for (outer_idx, outer) in rays.iter().enumerate() {
        let Some(outer_ray) = final_ray(outer) else {
            continue;
        };
        for inner in &rays[..outer_idx] {
            let Some(inner_ray) = final_ray(inner) else {
                continue;
            };
            if let Some(pt) =
                intersect_rays(&inner_ray.0, inner_ray.1, &outer_ray.0, outer_ray.1)
            {
                bbox.update(&pt);
                crossings.push(pt);
            }
        }
    }

    (crossings, bbox)
}

/// Origin and direction of a ray's escaping leg, if it escaped.
fn final_ray(ray: &TracedRay) -> Option<(Point2, f64)> {
    if ray.status.is_blocked() {
        return None;
    }
    let last = ray.strike_points.last()?;
    Some((*last, ray.reflect_dir?))
}

fn trace_sun_edge(arc: &MirrorArc, sun_edge_dir: f64, mirror_pt: &Point2) -> Option<TracedRay> {
    let trace = trace_concave(arc, sun_edge_dir, None, mirror_pt);
    if trace.status.is_blocked() {
        return None;
    }
    Some(TracedRay {
        sun_dir: sun_edge_dir,
        mirror_point: *mirror_pt,
        status: trace.status,
        reflect_dir: trace.reflect_dir,
        strike_points: trace.strike_points,
    })
}
