/// A block of constant resource usage `height` over the half-open time range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub start: i32,
    pub end: i32,
    pub height: i32,
}

impl Rectangle {
    pub fn new(start: i32, end: i32, height: i32) -> Self {
        Rectangle { start, end, height }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// The summed height of a set of rectangles as a sequence of contiguous rectangles which covers
/// the whole `i32` range; adjacent rectangles of the profile always have a different height.
///
/// Rectangles of the input may overlap and may have negative heights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceProfile {
    rectangles: Vec<Rectangle>,
}

impl ResourceProfile {
    pub fn new(rectangles: &[Rectangle]) -> Self {
        let mut points = Vec::with_capacity(2 * rectangles.len() + 2);
        points.push((i32::MIN, 0));
        points.push((i32::MAX, 0));
        for rectangle in rectangles.iter().filter(|rectangle| !rectangle.is_empty()) {
            points.push((rectangle.start, rectangle.height));
            points.push((rectangle.end, -rectangle.height));
        }
        points.sort_by_key(|&(time, _)| time);

        let mut profile: Vec<Rectangle> = Vec::new();
        let mut start = i32::MIN;
        let mut height = 0;
        for (time, delta) in points {
            if time != start {
                match profile.last_mut() {
                    Some(last) if last.height == height => last.end = time,
                    _ => profile.push(Rectangle::new(start, time, height)),
                }
                start = time;
            }
            height += delta;
        }

        ResourceProfile {
            rectangles: profile,
        }
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    /// The index of the rectangle which contains `time`, or `None` for `i32::MAX` which no
    /// half-open rectangle contains.
    pub fn rectangle_index(&self, time: i32) -> Option<usize> {
        let index = self
            .rectangles
            .partition_point(|rectangle| rectangle.end <= time);
        (index < self.rectangles.len() && self.rectangles[index].start <= time).then_some(index)
    }

    /// The height of the profile at `time`.
    pub fn height_at(&self, time: i32) -> i32 {
        self.rectangle_index(time)
            .map_or(0, |index| self.rectangles[index].height)
    }
}
