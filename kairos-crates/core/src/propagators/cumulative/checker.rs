use super::Rectangle;
use super::ResourceProfile;

/// Whether the summed height of the rectangles is at most `capacity` at every time point.
pub fn satisfies_cumulative_max(rectangles: &[Rectangle], capacity: i32) -> bool {
    ResourceProfile::new(rectangles)
        .rectangles()
        .iter()
        .all(|rectangle| rectangle.height <= capacity)
}

/// Whether the summed height of the rectangles is at least `min_capacity` at every time point
/// covered by at least one non-empty rectangle.
pub fn satisfies_cumulative_min(rectangles: &[Rectangle], min_capacity: i32) -> bool {
    let heights = ResourceProfile::new(rectangles);
    let coverage = ResourceProfile::new(
        &rectangles
            .iter()
            .map(|rectangle| Rectangle::new(rectangle.start, rectangle.end, 1))
            .collect::<Vec<_>>(),
    );

    coverage
        .rectangles()
        .iter()
        .filter(|covered| covered.height > 0)
        .all(|covered| {
            heights
                .rectangles()
                .iter()
                .filter(|rectangle| rectangle.start < covered.end && covered.start < rectangle.end)
                .all(|rectangle| rectangle.height >= min_capacity)
        })
}
