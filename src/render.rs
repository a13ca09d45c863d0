use crate::Universe;
use std::{fmt, io};

const ALIVE: char = 'O';
const DEAD: char = '-';

/// What a rendered frame shows for each cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// `O` for live cells, `-` for dead ones
    #[default]
    Cells,
    /// The live neighbor count of every cell, as a single digit
    Neighbors,
}

/// A borrowed, printable snapshot of a [`Universe`]
///
/// The output starts with a line break and ends every row with one.
pub struct UniverseView<'a> {
    universe: &'a Universe,
    mode: RenderMode,
}
impl<'a> UniverseView<'a> {
    pub fn new(universe: &'a Universe, mode: RenderMode) -> Self {
        Self { universe, mode }
    }

    fn glyph(&self, row: usize, col: usize) -> char {
        match self.mode {
            RenderMode::Cells if self.universe.is_alive(row, col) => ALIVE,
            RenderMode::Cells => DEAD,
            RenderMode::Neighbors => char::from(b'0' + self.universe.neighbor_count(row, col)),
        }
    }
}

impl fmt::Display for UniverseView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::with_capacity(self.universe.cols() + 1);
        writeln!(f)?;
        for row in 0..self.universe.rows() {
            line.clear();
            line.extend((0..self.universe.cols()).map(|col| self.glyph(row, col)));
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Writes the live/dead grid of `universe` to `sink`
pub fn render_universe<W: io::Write + ?Sized>(
    sink: &mut W,
    universe: &Universe,
) -> io::Result<()> {
    write!(sink, "{}", UniverseView::new(universe, RenderMode::Cells))
}

/// Writes the neighbor count of every cell of `universe` to `sink`
pub fn render_neighbor_counts<W: io::Write + ?Sized>(
    sink: &mut W,
    universe: &Universe,
) -> io::Result<()> {
    write!(sink, "{}", UniverseView::new(universe, RenderMode::Neighbors))
}

/// Something that can present successive frames of a [`Universe`]
pub trait Render {
    fn render(&mut self, universe: &Universe) -> io::Result<()>;
}

/// Renders frames as plain text into any [`io::Write`] sink
pub struct TextRender<W> {
    sink: W,
    mode: RenderMode,
}
impl<W: io::Write> TextRender<W> {
    pub fn new(sink: W, mode: RenderMode) -> Self {
        Self { sink, mode }
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }
}
impl<W: io::Write> Render for TextRender<W> {
    fn render(&mut self, universe: &Universe) -> io::Result<()> {
        match self.mode {
            RenderMode::Cells => render_universe(&mut self.sink, universe)?,
            RenderMode::Neighbors => render_neighbor_counts(&mut self.sink, universe)?,
        }
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Universe {
        let mut universe = Universe::new(3, 4).expect("allocate universe");
        universe.set_alive(1, 0, true);
        universe.set_alive(1, 1, true);
        universe.set_alive(1, 2, true);
        universe
    }

    fn rendered(universe: &Universe) -> String {
        let mut out = Vec::new();
        render_universe(&mut out, universe).expect("write to vec");
        String::from_utf8(out).expect("ascii output")
    }

    #[test]
    fn renders_cells_row_by_row() {
        assert_eq!(rendered(&blinker()), "\n----\nOOO-\n----\n");
    }

    #[test]
    fn renders_empty_universe() {
        let universe = Universe::new(2, 2).expect("allocate universe");

        assert_eq!(rendered(&universe), "\n--\n--\n");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let mut universe = Universe::new(6, 9).expect("allocate universe");
        universe.randomize(3);

        assert_eq!(rendered(&universe), rendered(&universe));
    }

    #[test]
    fn renders_neighbor_counts() {
        let mut out = Vec::new();
        render_neighbor_counts(&mut out, &blinker()).expect("write to vec");

        // every row neighbors row 1 on a 3-row torus
        assert_eq!(String::from_utf8(out).unwrap(), "\n2322\n1212\n2322\n");
    }

    #[test]
    fn text_render_follows_mode() {
        let universe = blinker();
        let mut cells = TextRender::new(Vec::new(), RenderMode::Cells);
        let mut counts = TextRender::new(Vec::new(), RenderMode::Neighbors);

        cells.render(&universe).expect("render cells");
        counts.render(&universe).expect("render counts");

        assert_eq!(*cells.sink_mut(), rendered(&universe).into_bytes());
        assert!(counts.sink_mut().iter().all(|b| b.is_ascii_digit() || *b == b'\n'));
    }
}
