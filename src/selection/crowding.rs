use std::cmp::Ordering;

/// Crowding score of every member of one dominance layer.
///
/// For each objective the layer is sorted by that objective; the first and last
/// members receive `f64::INFINITY`, every interior member adds the absolute
/// difference between its two neighbours' values. Scores are summed over the
/// objectives. Distances are not normalised by the objective range.
///
/// Layers of one or two members are all boundary and score infinity. Vectors
/// are expected to have equal length; with ragged input only the objectives
/// present in every vector are scored.
///
/// ```
/// use evogen::selection::crowding_distance;
///
/// let scores = crowding_distance(&[[1.0], [2.0], [5.0]]);
///
/// assert!(scores[0].is_infinite());
/// assert_eq!(scores[1], 4.0);
/// assert!(scores[2].is_infinite());
/// ```
pub fn crowding_distance<T>(objectives: &[T]) -> Vec<f64>
where
    T: AsRef<[f64]>,
{
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives
        .iter()
        .map(|objective| objective.as_ref().len())
        .min()
        .unwrap_or(0);
    let mut distances = vec![0.0f64; n];
    let mut order: Vec<usize> = (0..n).collect();

    for objective in 0..m {
        let value = |idx: usize| objectives[idx].as_ref()[objective];

        order.sort_by(|&a, &b| value(a).partial_cmp(&value(b)).unwrap_or(Ordering::Equal));

        distances[order[0]] = f64::INFINITY;
        distances[order[n - 1]] = f64::INFINITY;

        for window in order.windows(3) {
            let (prev, current, next) = (window[0], window[1], window[2]);
            distances[current] += (value(next) - value(prev)).abs();
        }
    }

    distances
}

/// Indices of `objectives` ordered by descending crowding score.
///
/// The sort is stable, so equal scores keep their original order.
pub fn crowding_order<T>(objectives: &[T]) -> Vec<usize>
where
    T: AsRef<[f64]>,
{
    let distances = crowding_distance(objectives);
    let mut order: Vec<usize> = (0..objectives.len()).collect();
    order.sort_by(|&a, &b| {
        distances[b]
            .partial_cmp(&distances[a])
            .unwrap_or(Ordering::Equal)
    });
    order
}
