//! Inverse search: find the arc points that reflect a given sun
//! direction through a fixed scene point.
//!
//! The search samples the normal window uniformly, traces a ray from
//! the scene point to each sample, and refines every pair of adjacent
//! samples whose reflected directions bracket the target by recursing
//! into the narrowed window.

use tracing::{debug, warn};

use crate::geometry::MirrorArc;
use crate::math::angle::{nearly_equal, normalize_angle};
use crate::math::point_2d::direction;
use crate::math::Point2;

use super::concave::trace_concave;
use super::TracedRay;

/// Samples per bracketing pass.
pub const SEARCH_STEPS: usize = 51;

/// Recursion cap for bracket refinement.
pub const MAX_SEARCH_DEPTH: usize = 32;

/// Searches the normal window `[min_normal_dir, max_normal_dir]` of
/// the arc for points that reflect a ray from `start_pt` into
/// `target_sun_dir`.
///
/// Matches are appended to `found` with their sense flipped back to
/// sun-to-scene: `sun_dir` is the direction sunlight travels and
/// `reflect_dir` is the direction from the mirror toward `start_pt`.
/// Returns the number of rays appended.
pub fn search_arc_for_sun(
    arc: &MirrorArc,
    start_pt: &Point2,
    target_sun_dir: f64,
    min_normal_dir: f64,
    max_normal_dir: f64,
    found: &mut Vec<TracedRay>,
) -> usize {
    search_window(
        arc,
        start_pt,
        target_sun_dir,
        min_normal_dir,
        max_normal_dir,
        found,
        0,
    )
}

fn search_window(
    arc: &MirrorArc,
    start_pt: &Point2,
    target_sun_dir: f64,
    min_normal_dir: f64,
    max_normal_dir: f64,
    found: &mut Vec<TracedRay>,
    depth: usize,
) -> usize {
    let step = (max_normal_dir - min_normal_dir) / (SEARCH_STEPS - 1) as f64;
    let normals: Vec<f64> = (0..SEARCH_STEPS)
        .map(|j| min_normal_dir + j as f64 * step)
        .collect();

    // Reflected sun direction at each sample that produced one, used
    // both for bracketing and to suppress duplicate matches from
    // adjacent samples.
    let mut sample_suns: Vec<Option<f64>> = vec![None; SEARCH_STEPS];
    let mut matches = 0;

    for j in 0..SEARCH_STEPS {
        let target_pt = arc.point_at_normal(normals[j]);
        let incident_dir = direction(start_pt, &target_pt);
        let trace = trace_concave(arc, incident_dir, Some(start_pt), &target_pt);
        if trace.status.is_blocked() {
            continue;
        }
        let Some(reflected) = trace.reflect_dir else {
            continue;
        };
        sample_suns[j] = Some(reflected);

        if nearly_equal(target_sun_dir, reflected) {
            // Skip when the previous sample already matched here.
            if j == 0 || sample_suns[j - 1].is_some() {
                debug!(normal = normals[j], reflected, "inverse search match");
                found.push(TracedRay {
                    sun_dir: normalize_angle(reflected + 180.0),
                    mirror_point: target_pt,
                    status: trace.status,
                    reflect_dir: Some(normalize_angle(incident_dir + 180.0)),
                    strike_points: trace.strike_points,
                });
                matches += 1;
            }
            sample_suns[j] = None;
        }
    }

    for j in 1..SEARCH_STEPS {
        let (Some(prev), Some(next)) = (sample_suns[j - 1], sample_suns[j]) else {
            continue;
        };
        let brackets = (prev < target_sun_dir && next > target_sun_dir)
            || (prev > target_sun_dir && next < target_sun_dir);
        if !brackets || nearly_equal(prev, next) || nearly_equal(normals[j - 1], normals[j]) {
            continue;
        }
        if depth >= MAX_SEARCH_DEPTH {
            warn!(
                min = normals[j - 1],
                max = normals[j],
                "bracket refinement depth cap reached"
            );
            continue;
        }
        matches += search_window(
            arc,
            start_pt,
            target_sun_dir,
            normals[j - 1],
            normals[j],
            found,
            depth + 1,
        );
    }

    matches
}
