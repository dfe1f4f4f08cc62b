/// Angle and overlap math shared by the weapon, enemy and combat modules.
///
/// Angles are in degrees, counter-clockwise from the positive X axis, with
/// the screen's downward Y already accounted for: a heading of 90° moves a
/// projectile up the screen and −90° moves it down.

/// Axis-aligned rectangle described by its centre and full size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn centered(cx: f32, cy: f32, (w, h): (f32, f32)) -> Rect {
        Rect { cx, cy, w, h }
    }

    pub fn left(&self) -> f32 {
        self.cx - self.w / 2.0
    }

    pub fn right(&self) -> f32 {
        self.cx + self.w / 2.0
    }

    pub fn top(&self) -> f32 {
        self.cy - self.h / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.cy + self.h / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Unit step for a heading, already in screen space (Y down).
pub fn heading_vector(angle_deg: f32) -> (f32, f32) {
    let rad = angle_deg.to_radians();
    (rad.cos(), -rad.sin())
}

/// Heading from `(x, y)` toward `(target_x, target_y)`.
///
/// The angle off the downward vertical comes from the law of cosines over
/// the vertical displacement and the straight-line distance; `jitter` is
/// added to it before the left/right branch is chosen.  A target directly
/// below (same x) always yields −90° with no jitter.
pub fn bearing_to(x: f32, y: f32, target_x: f32, target_y: f32, jitter: f32) -> f32 {
    let distance = ((x - target_x).powi(2) + (target_y - y).powi(2)).sqrt();
    if distance == 0.0 || target_x == x {
        return -90.0;
    }
    let ratio = ((target_y - y) / distance).clamp(-1.0, 1.0);
    let off_vertical = ratio.acos().to_degrees() + jitter;
    if target_x < x {
        -90.0 - off_vertical
    } else {
        -90.0 + off_vertical
    }
}
