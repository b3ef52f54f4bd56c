use std::fmt;

use crate::coords::PointAxial;
use Direction::*;
use Redirect::*;

/// Subset of instructions that change the direction of the current IP.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Redirect {
    MirrorHori,
    MirrorVert,
    MirrorForw,
    MirrorBack,
    BranchLeft,
    BranchRight,
}

/// Possible directions of travel for each IP.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    NorthWest,
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
}

impl Direction {
    /// Returns a `PointAxial` representing one grid space of movement
    /// in a given direction.
    pub fn to_vector(self) -> PointAxial {
        match self {
            NorthWest => PointAxial(0, -1),
            NorthEast => PointAxial(-1, 0),
            East => PointAxial(-1, 1),
            SouthEast => PointAxial(0, 1),
            SouthWest => PointAxial(1, 0),
            West => PointAxial(1, -1),
        }
    }
}

/// Returns a reflected `Direction` based on which `Redirect` it hit and
/// whether the current memory edge is positive.
///
/// The mirrors are fixed permutations of the directions; `<` and `>` act
/// as mirrors except head-on (`E` into `<`, `W` into `>`), where they
/// branch 60 degrees right when the edge is positive and left otherwise.
pub fn redirect(dir: Direction, redir: Redirect, positive: bool) -> Direction {
    match (dir, redir) {
        (NorthWest, MirrorHori) => SouthWest,
        (NorthWest, MirrorVert) => NorthEast,
        (NorthWest, MirrorForw) => East,
        (NorthWest, MirrorBack) => NorthWest,
        (NorthWest, BranchLeft) => West,
        (NorthWest, BranchRight) => SouthEast,
        (NorthEast, MirrorHori) => SouthEast,
        (NorthEast, MirrorVert) => NorthWest,
        (NorthEast, MirrorForw) => NorthEast,
        (NorthEast, MirrorBack) => West,
        (NorthEast, BranchLeft) => SouthWest,
        (NorthEast, BranchRight) => East,
        (East, MirrorHori) => East,
        (East, MirrorVert) => West,
        (East, MirrorForw) => NorthWest,
        (East, MirrorBack) => SouthWest,
        (East, BranchLeft) => if positive { SouthEast } else { NorthEast },
        (East, BranchRight) => West,
        (SouthEast, MirrorHori) => NorthEast,
        (SouthEast, MirrorVert) => SouthWest,
        (SouthEast, MirrorForw) => West,
        (SouthEast, MirrorBack) => SouthEast,
        (SouthEast, BranchLeft) => NorthWest,
        (SouthEast, BranchRight) => East,
        (SouthWest, MirrorHori) => NorthWest,
        (SouthWest, MirrorVert) => SouthEast,
        (SouthWest, MirrorForw) => SouthWest,
        (SouthWest, MirrorBack) => East,
        (SouthWest, BranchLeft) => West,
        (SouthWest, BranchRight) => NorthEast,
        (West, MirrorHori) => West,
        (West, MirrorVert) => East,
        (West, MirrorForw) => SouthEast,
        (West, MirrorBack) => NorthEast,
        (West, BranchLeft) => East,
        (West, BranchRight) => if positive { NorthWest } else { SouthWest },
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            NorthWest => "NW",
            NorthEast => "NE",
            East => "E",
            SouthEast => "SE",
            SouthWest => "SW",
            West => "W",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 6] = [NorthWest, NorthEast, East, SouthEast, SouthWest, West];

    #[test]
    fn offsets_are_unit_steps() {
        for &dir in &ALL {
            let v = dir.to_vector();
            assert_eq!(v.ring(), 1, "{}", dir);
        }
    }

    #[test]
    fn opposite_offsets_cancel() {
        for &(a, b) in &[(East, West), (NorthWest, SouthEast), (NorthEast, SouthWest)] {
            assert_eq!(a.to_vector() + b.to_vector(), PointAxial(0, 0));
        }
    }

    #[test]
    fn mirrors_permute_directions() {
        assert_eq!(redirect(NorthWest, MirrorForw, false), East);
        assert_eq!(redirect(East, MirrorForw, false), NorthWest);
        assert_eq!(redirect(NorthEast, MirrorBack, false), West);
        assert_eq!(redirect(East, MirrorHori, false), East);
        assert_eq!(redirect(NorthWest, MirrorHori, false), SouthWest);
        assert_eq!(redirect(East, MirrorVert, false), West);
        // A mirror never depends on the memory edge
        for &dir in &ALL {
            for &m in &[MirrorHori, MirrorVert, MirrorForw, MirrorBack] {
                assert_eq!(redirect(dir, m, true), redirect(dir, m, false));
            }
        }
    }

    #[test]
    fn head_on_branches_follow_edge_sign() {
        assert_eq!(redirect(East, BranchLeft, true), SouthEast);
        assert_eq!(redirect(East, BranchLeft, false), NorthEast);
        assert_eq!(redirect(West, BranchRight, true), NorthWest);
        assert_eq!(redirect(West, BranchRight, false), SouthWest);
    }

    #[test]
    fn oblique_branches_are_mirrors() {
        assert_eq!(redirect(SouthEast, BranchLeft, true), NorthWest);
        assert_eq!(redirect(SouthEast, BranchLeft, false), NorthWest);
        assert_eq!(redirect(NorthEast, BranchRight, true), East);
        assert_eq!(redirect(NorthEast, BranchRight, false), East);
    }
}
