use tessera_grid::{Coord, Range};

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Cached neighbor computation helper.
///
/// Enumerates the 4-directional neighbors of a coordinate that lie inside a
/// range, in N, E, S, W order.
pub struct Neighbors {
    buf: Vec<Coord>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// In-bounds cardinal neighbors of `c`.
    pub fn cardinal_in(&mut self, bounds: Range, c: Coord) -> &[Coord] {
        self.cardinal_filtered(bounds, c, |_| true)
    }

    /// In-bounds cardinal neighbors of `c` for which `keep` returns `true`.
    pub fn cardinal_filtered(
        &mut self,
        bounds: Range,
        c: Coord,
        keep: impl Fn(Coord) -> bool,
    ) -> &[Coord] {
        self.buf.clear();
        for n in c.cardinal() {
            if bounds.contains(n) && keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_two_neighbors() {
        let mut nb = Neighbors::new();
        let r = Range::new(0, 0, 3, 3);
        assert_eq!(
            nb.cardinal_in(r, Coord::new(0, 0)),
            &[Coord::new(1, 0), Coord::new(0, 1)]
        );
        assert_eq!(nb.cardinal_in(r, Coord::new(1, 1)).len(), 4);
        assert_eq!(
            nb.cardinal_in(r, Coord::new(2, 2)),
            &[Coord::new(2, 1), Coord::new(1, 2)]
        );
    }

    #[test]
    fn filter_applies() {
        let mut nb = Neighbors::new();
        let r = Range::new(0, 0, 3, 3);
        let got = nb.cardinal_filtered(r, Coord::new(1, 1), |c| c.y == 1);
        assert_eq!(got, &[Coord::new(2, 1), Coord::new(0, 1)]);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Coord::new(0, 0), Coord::new(3, -4)), 7);
        assert_eq!(manhattan(Coord::new(2, 2), Coord::new(2, 2)), 0);
    }
}
