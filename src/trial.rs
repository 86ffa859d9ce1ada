use std::fmt;

/// Grid edge an icon is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];
}

/// Categorical answer recorded by the operator for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ko,
    So,
    A,
}

impl Response {
    pub fn label(&self) -> &'static str {
        match self {
            Response::Ko => "こ",
            Response::So => "そ",
            Response::A => "あ",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// `(x, y)` with the shortest round-trip rendering of each coordinate.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

/// Axis-aligned box the icon occupies, in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconBox {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl IconBox {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.bottom + self.top) / 2.0)
    }
}

impl fmt::Display for IconBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}, {:.2}, {:.2}]",
            self.left, self.right, self.bottom, self.top
        )
    }
}

/// One presented frame. The response stays unset until the operator answers.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub frame: usize,
    pub side: Side,
    pub red_dot: Point,
    pub icon: IconBox,
    pub response: Option<Response>,
}

impl Trial {
    pub fn new(frame: usize, side: Side, red_dot: Point, icon: IconBox) -> Self {
        Self {
            frame,
            side,
            red_dot,
            icon,
            response: None,
        }
    }

    pub fn respond(self, response: Response) -> Self {
        Self {
            response: Some(response),
            ..self
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "Frame: {}, Red Dot ({:.2}, {:.2}), Cartoon Icon {} on {}",
            self.frame, self.red_dot.x, self.red_dot.y, self.icon, self.side
        )
    }
}
