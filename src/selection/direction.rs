/// Whether larger or smaller objective values are better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Higher values are better.
    Maximize,
    /// Lower values are better.
    #[default]
    Minimize,
}

impl Direction {
    /// Returns `true` if `a` is strictly better than `b`. NaN is never better.
    pub fn is_strictly_better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Maximize => a > b,
            Direction::Minimize => a < b,
        }
    }

    /// Returns `true` if `a` is at least as good as `b`.
    pub fn is_no_worse(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Maximize => a >= b,
            Direction::Minimize => a <= b,
        }
    }
}
