use super::measure::Measure;
use super::ring::Ring;
use super::support::Support;
use std::collections::HashMap;

/// Memoizing front of a [`Measure`], scoped to one distance computation.
///
/// Every resolved distance is stored under both `(x, y)` and `(y, x)`,
/// so each unordered pair reaches the underlying measure at most once.
/// This presumes the measure is symmetric.
pub struct Resolver<'a, X, N, M> {
    measure: &'a M,
    cache: HashMap<(X, X), N>,
    evaluations: usize,
}

impl<'a, X, N, M> Resolver<'a, X, N, M>
where
    X: Support,
    N: Ring,
    M: Measure<X, N>,
{
    pub fn new(measure: &'a M) -> Self {
        Self {
            measure,
            cache: HashMap::default(),
            evaluations: 0,
        }
    }
    /// cost of moving one unit of mass from `x` to `y`
    pub fn distance(&mut self, x: &X, y: &X) -> N {
        let key = (x.clone(), y.clone());
        match self.cache.get(&key) {
            Some(d) => d.clone(),
            None => {
                let d = self.measure.distance(x, y);
                self.evaluations += 1;
                self.cache.insert((y.clone(), x.clone()), d.clone());
                self.cache.insert(key, d.clone());
                d
            }
        }
    }
    /// number of times the underlying measure was invoked
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn is_unordered_pair_evaluated_once() {
        let calls = Cell::new(0usize);
        let measure = |x: &i64, y: &i64| {
            calls.set(calls.get() + 1);
            (x - y).abs()
        };
        let mut resolver = Resolver::new(&measure);
        assert!(resolver.distance(&1, &4) == 3);
        assert!(resolver.distance(&4, &1) == 3);
        assert!(resolver.distance(&1, &4) == 3);
        assert!(resolver.distance(&2, &2) == 0);
        assert!(resolver.evaluations() == 2);
        assert!(calls.get() == 2);
    }
    #[test]
    fn is_cached_value_verbatim() {
        let measure = |x: &char, y: &char| match (x, y) {
            ('a', 'b') => 7i64,
            _ => 100,
        };
        let mut resolver = Resolver::new(&measure);
        assert!(resolver.distance(&'a', &'b') == 7);
        assert!(resolver.distance(&'b', &'a') == 7);
        assert!(resolver.evaluations() == 1);
    }
}
