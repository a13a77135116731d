use padpointer_workspace::Viewport;

/// Position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the area the cursor lives in. Valid positions are
/// `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.width),
            point.y.clamp(0.0, self.height),
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

impl From<Viewport> for Bounds {
    fn from(value: Viewport) -> Self {
        Self::new(value.width as f32, value.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_points_inside() {
        let bounds = Bounds::new(800.0, 600.0);
        assert_eq!(bounds.clamp(Point::new(-5.0, 700.0)), Point::new(0.0, 600.0));
        assert_eq!(bounds.clamp(Point::new(400.0, 10.0)), Point::new(400.0, 10.0));
        assert!(bounds.contains(Point::new(800.0, 600.0)));
        assert!(!bounds.contains(Point::new(800.5, 0.0)));
    }

    #[test]
    fn center_of_viewport() {
        let bounds = Bounds::from(Viewport {
            width: 1920,
            height: 1080,
        });
        assert_eq!(bounds.center(), Point::new(960.0, 540.0));
    }
}
