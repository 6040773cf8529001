use crate::{Grid, REQUIRED_LABELS};

/// A label list like the ones players type in: at most one label per
/// player cell.
#[derive(Clone, Debug)]
pub struct LabelList(pub Vec<String>);

impl quickcheck::Arbitrary for LabelList {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let len = usize::arbitrary(g) % (REQUIRED_LABELS + 1);
        LabelList((0..len).map(|_| String::arbitrary(g)).collect())
    }
}

/// A card with arbitrary labels and arbitrary checks.
#[derive(Clone, Debug)]
pub struct CheckedGrid(pub Grid);

impl quickcheck::Arbitrary for CheckedGrid {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut grid = Grid::with_labels(&LabelList::arbitrary(g).0);
        let ids: Vec<_> = grid.cells().iter().map(|cell| cell.id).collect();
        for id in ids {
            if bool::arbitrary(g) {
                grid.toggle(id);
            }
        }
        CheckedGrid(grid)
    }
}
