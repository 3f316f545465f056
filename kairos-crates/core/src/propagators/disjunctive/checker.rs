/// Whether the given `(start, end)` intervals pairwise do not overlap; an interval which ends at
/// the start of another does not overlap it.
///
/// Every pair needs one of the two to end before the other starts, which also holds for intervals
/// of length zero.
pub fn satisfies_no_overlap(intervals: &[(i32, i32)]) -> bool {
    intervals.iter().enumerate().all(|(index, &(start_a, end_a))| {
        intervals[index + 1..]
            .iter()
            .all(|&(start_b, end_b)| end_a <= start_b || end_b <= start_a)
    })
}
