use glam::Vec3;

/// Axis-aligned bounds of a mesh in object space
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds enclosing every point, or `None` for an empty set
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, -0.5),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -0.5));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn test_aabb_from_no_points() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_aabb_center_and_extent() {
        let aabb = Aabb::new(Vec3::new(-2.0, -4.0, -6.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::ZERO);
        assert_eq!(aabb.extent(), Vec3::new(4.0, 8.0, 12.0));
    }

    #[test]
    fn test_aabb_union_contained() {
        let outer = Aabb::new(Vec3::ZERO, Vec3::splat(5.0));
        let inner = Aabb::new(Vec3::ONE, Vec3::splat(2.0));
        assert_eq!(outer.union(&inner), outer);
    }
}
