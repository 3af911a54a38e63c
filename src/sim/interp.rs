//! Scattered-data linear interpolation
//!
//! Points are triangulated with Bowyer-Watson (Delaunay), and a query is
//! answered with barycentric weights of the triangle that contains it.
//! Queries outside the convex hull of the samples return NaN.

use glam::{DVec2, DVec3};

/// Barycentric slack so points on a shared edge or hull boundary still hit
const EDGE_TOLERANCE: f64 = 1e-9;
/// How far the enclosing super-triangle extends past the data, in extents
const SUPER_TRIANGLE_SCALE: f64 = 100.0;

/// Twice the signed area of (a, b, c); positive when counter-clockwise
#[inline]
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// True if `p` lies strictly inside the circumcircle of CCW triangle (a, b, c)
fn in_circumcircle(a: DVec2, b: DVec2, c: DVec2, p: DVec2) -> bool {
    let (a, b, c) = (a - p, b - p, c - p);
    let det = a.length_squared() * b.perp_dot(c) - b.length_squared() * a.perp_dot(c)
        + c.length_squared() * a.perp_dot(b);
    det > 0.0
}

/// Delaunay triangulation of a planar point set
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    points: Vec<DVec2>,
    /// Counter-clockwise vertex indices into `points`
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Triangulate `points`. Collinear or fewer than three points give an
    /// empty triangulation.
    pub fn new(points: Vec<DVec2>) -> Self {
        let n = points.len();
        if n < 3 {
            return Self {
                points,
                triangles: Vec::new(),
            };
        }

        let (min, max) = points
            .iter()
            .fold((points[0], points[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        let extent = (max - min).max_element().max(f64::EPSILON);
        let mid = (min + max) / 2.0;
        let d = extent * SUPER_TRIANGLE_SCALE;

        let mut work = points.clone();
        work.push(DVec2::new(mid.x - d, mid.y - d));
        work.push(DVec2::new(mid.x + d, mid.y - d));
        work.push(DVec2::new(mid.x, mid.y + d));

        let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];
        for i in 0..n {
            let p = work[i];
            let (bad, keep): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
                .into_iter()
                .partition(|t| in_circumcircle(work[t[0]], work[t[1]], work[t[2]], p));

            // Edges of the cavity are the ones used by exactly one bad triangle
            let mut edges: Vec<(usize, usize)> = Vec::with_capacity(bad.len() * 3);
            for t in &bad {
                for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                    if let Some(pos) = edges.iter().position(|&(u, v)| u == b && v == a) {
                        edges.swap_remove(pos);
                    } else {
                        edges.push((a, b));
                    }
                }
            }

            triangles = keep;
            for (a, b) in edges {
                // Cavity edges keep the CCW winding of their bad triangle
                triangles.push([a, b, i]);
            }
        }

        triangles.retain(|t| {
            t.iter().all(|&v| v < n) && orient(points[t[0]], points[t[1]], points[t[2]]).abs() > 0.0
        });

        Self { points, triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Containing triangle and barycentric weights for `q`
    fn locate(&self, q: DVec2) -> Option<([usize; 3], [f64; 3])> {
        self.triangles.iter().find_map(|t| {
            let (a, b, c) = (self.points[t[0]], self.points[t[1]], self.points[t[2]]);
            let area = orient(a, b, c);
            let wa = orient(q, b, c) / area;
            let wb = orient(a, q, c) / area;
            let wc = 1.0 - wa - wb;
            (wa >= -EDGE_TOLERANCE && wb >= -EDGE_TOLERANCE && wc >= -EDGE_TOLERANCE)
                .then_some((*t, [wa, wb, wc]))
        })
    }
}

/// Piecewise-linear interpolant over scattered (x, y) -> z samples
#[derive(Debug, Clone, Default)]
pub struct LinearInterpolant {
    mesh: Triangulation,
    values: Vec<f64>,
}

impl LinearInterpolant {
    /// Build from (x, y, z) samples. Repeated (x, y) locations keep the first z.
    pub fn new(samples: impl IntoIterator<Item = DVec3>) -> Self {
        let mut points: Vec<DVec2> = Vec::new();
        let mut values: Vec<f64> = Vec::new();
        for s in samples {
            let p = s.truncate();
            if !points.contains(&p) {
                points.push(p);
                values.push(s.z);
            }
        }
        Self {
            mesh: Triangulation::new(points),
            values,
        }
    }

    /// True when no triangle could be formed; every query will be NaN
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    pub fn mesh(&self) -> &Triangulation {
        &self.mesh
    }

    /// Interpolated value at `q`, or NaN outside the convex hull
    pub fn value(&self, q: DVec2) -> f64 {
        match self.mesh.locate(q) {
            Some((t, w)) => w[0] * self.values[t[0]] + w[1] * self.values[t[1]] + w[2] * self.values[t[2]],
            None => f64::NAN,
        }
    }
}
