use super::segment::Segment;
use crate::mask::Mask;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const SHIFT: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f64,
    /// Angle resolution of the accumulator in degrees.
    pub theta_deg: f64,
    /// Minimum votes before a line is traced.
    pub threshold: u32,
    /// Minimum extent along x or y for a traced line to be kept.
    pub min_line_length: i32,
    /// Maximum run of off-pixels bridged while tracing.
    pub max_line_gap: i32,
    /// Seed for the pixel visiting order.
    pub seed: u64,
    /// Stop after this many segments; 0 means unbounded.
    pub max_lines: usize,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta_deg: 1.0,
            threshold: 50,
            min_line_length: 20,
            max_line_gap: 10,
            seed: 0x5eed,
            max_lines: 0,
        }
    }
}

struct Accumulator {
    num_angle: usize,
    num_rho: usize,
    trig: Vec<(f32, f32)>,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(width: usize, height: usize, params: &HoughParams) -> Self {
        let theta = params.theta_deg.to_radians();
        let num_angle = ((std::f64::consts::PI / theta).round() as usize).max(1);
        let num_rho = ((((width + height) * 2 + 1) as f64 / params.rho).round() as usize).max(1);
        let irho = 1.0 / params.rho;
        let trig = (0..num_angle)
            .map(|n| {
                let ang = n as f64 * theta;
                ((ang.cos() * irho) as f32, (ang.sin() * irho) as f32)
            })
            .collect();
        Self {
            num_angle,
            num_rho,
            trig,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: i64, y: i64) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as i64 + (self.num_rho as i64 - 1) / 2;
        n * self.num_rho + r.clamp(0, self.num_rho as i64 - 1) as usize
    }

    /// Add one vote per angle and return `(best_votes, best_angle)`.
    fn vote(&mut self, x: i64, y: i64) -> (i32, usize) {
        let mut best = (i32::MIN, 0);
        for n in 0..self.num_angle {
            let idx = self.bin(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > best.0 {
                best = (self.votes[idx], n);
            }
        }
        best
    }

    fn unvote(&mut self, x: i64, y: i64) {
        for n in 0..self.num_angle {
            let idx = self.bin(n, x, y);
            self.votes[idx] -= 1;
        }
    }
}

/// Fixed-point walker along one traced direction.
#[derive(Clone, Copy)]
struct Walk {
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    x_major: bool,
}

impl Walk {
    fn new(x: i64, y: i64, a: f32, b: f32) -> Self {
        let half = 1i64 << (SHIFT - 1);
        if a.abs() > b.abs() {
            Self {
                x0: x,
                y0: (y << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b as f64 * (1i64 << SHIFT) as f64 / a.abs() as f64).round() as i64,
                x_major: true,
            }
        } else {
            Self {
                x0: (x << SHIFT) + half,
                y0: y,
                dx: (a as f64 * (1i64 << SHIFT) as f64 / b.abs() as f64).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            ..self
        }
    }

    #[inline]
    fn pixel(&self, x: i64, y: i64) -> (i64, i64) {
        if self.x_major {
            (x, y >> SHIFT)
        } else {
            (x >> SHIFT, y)
        }
    }
}

struct WorkMask {
    width: i64,
    height: i64,
    on: Vec<bool>,
}

impl WorkMask {
    #[inline]
    fn inside(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn idx(&self, x: i64, y: i64) -> usize {
        (y * self.width + x) as usize
    }
}

/// Detect line segments in `mask`. Deterministic for a given `params.seed`.
pub fn probabilistic_hough(mask: &Mask, params: &HoughParams) -> Vec<Segment> {
    let (w, h) = (mask.width(), mask.height());
    let mut lines = Vec::new();
    if w == 0 || h == 0 || params.rho <= 0.0 || params.theta_deg <= 0.0 {
        return lines;
    }

    let mut work = WorkMask {
        width: w as i64,
        height: h as i64,
        on: vec![false; w * h],
    };
    let mut points: Vec<(i64, i64)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if mask.is_on(x, y) {
                work.on[y * w + x] = true;
                points.push((x as i64, y as i64));
            }
        }
    }

    let mut acc = Accumulator::new(w, h, params);
    let mut rng = StdRng::seed_from_u64(params.seed);
    let threshold = params.threshold as i32;

    let mut count = points.len();
    while count > 0 {
        let pick = rng.gen_range(0..count);
        let (px, py) = points[pick];
        points[pick] = points[count - 1];
        count -= 1;

        if !work.on[work.idx(px, py)] {
            continue;
        }

        let (max_votes, best_n) = acc.vote(px, py);
        if max_votes < threshold {
            continue;
        }

        let (c, s) = acc.trig[best_n];
        let forward = Walk::new(px, py, -s, c);
        let walks = [forward, forward.reversed()];

        let mut ends = [(px, py); 2];
        for (end, walk) in ends.iter_mut().zip(walks.iter()) {
            let mut gap = 0;
            let (mut x, mut y) = (walk.x0, walk.y0);
            loop {
                let (j, i) = walk.pixel(x, y);
                if !work.inside(j, i) {
                    break;
                }
                if work.on[work.idx(j, i)] {
                    gap = 0;
                    *end = (j, i);
                } else {
                    gap += 1;
                    if gap > params.max_line_gap {
                        break;
                    }
                }
                x += walk.dx;
                y += walk.dy;
            }
        }

        let good_line = (ends[1].0 - ends[0].0).abs() >= params.min_line_length as i64
            || (ends[1].1 - ends[0].1).abs() >= params.min_line_length as i64;

        for (end, walk) in ends.iter().zip(walks.iter()) {
            let (mut x, mut y) = (walk.x0, walk.y0);
            loop {
                let (j, i) = walk.pixel(x, y);
                if !work.inside(j, i) {
                    break;
                }
                let idx = work.idx(j, i);
                if work.on[idx] {
                    if good_line {
                        acc.unvote(j, i);
                    }
                    work.on[idx] = false;
                }
                if (j, i) == *end {
                    break;
                }
                x += walk.dx;
                y += walk.dy;
            }
        }

        if good_line {
            lines.push(Segment::new(
                [ends[0].0 as i32, ends[0].1 as i32],
                [ends[1].0 as i32, ends[1].1 as i32],
            ));
            if params.max_lines > 0 && lines.len() >= params.max_lines {
                break;
            }
        }
    }

    debug!("hough: {} segments from {} mask pixels", lines.len(), mask.on_count());
    lines
}
