use crate::Coord;
use crate::cell::Cell;
use crate::cell_set::CellSet;

/// First codepoint of the braille block, the character with no dots raised.
const BRAILLE_BLANK: u32 = 0x2800;

/// Dot bits of a braille character, indexed by `[row][column]` inside its 2x4 block.
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// A window onto the plane, drawn with braille characters so each character shows a 2x4 block
/// of cells.
///
/// The camera only ever reads a [`CellSet`]; it never touches the simulation.
pub struct Camera {
    /// Raised dots of every character in the view, row by row
    dots: Vec<u8>,

    frame: String,

    /// Width of the view, in cells
    w: usize,

    /// Height of the view, in cells
    h: usize,

    /// World position of the top-left cell of the view
    x: Coord,
    y: Coord,
}

impl Camera {
    /// A `w` by `h` cell view with the world origin in its middle.
    pub fn new(w: usize, h: usize) -> Self {
        let mut cam = Self {
            dots: Vec::new(),
            frame: String::new(),
            w: 0,
            h: 0,
            x: 0,
            y: 0,
        };

        cam.set_size(w, h);
        cam.reset_view();
        cam
    }

    /// A camera filling a terminal of `cols` by `rows` characters, keeping `reserved` rows free
    /// for text.
    pub fn for_terminal(cols: u16, rows: u16, reserved: u16) -> Self {
        let rows = rows.saturating_sub(reserved);

        Self::new(cols as usize * 2, rows as usize * 4)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// World position of the top-left cell of the view.
    pub fn position(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    pub fn pan(&mut self, dx: Coord, dy: Coord) {
        self.x += dx;
        self.y += dy;
    }

    /// Put the world origin back in the middle of the view.
    pub fn reset_view(&mut self) {
        self.x = -(self.w as Coord / 2);
        self.y = -(self.h as Coord / 2);
    }

    /// Change the view size, keeping the cell in the middle of the view where it is.
    pub fn resize(&mut self, w: usize, h: usize) {
        let mid = self.position().offset(self.w as Coord / 2, self.h as Coord / 2);

        self.set_size(w, h);
        self.x = mid.x - w as Coord / 2;
        self.y = mid.y - h as Coord / 2;
    }

    pub fn clear(&mut self) {
        self.dots.fill(0);
    }

    /// Raise the dot of every live cell that falls inside the view.
    pub fn draw(&mut self, cells: &CellSet) {
        let columns = self.columns();

        for cell in cells {
            if let Some((col, row)) = self.view_position(cell) {
                self.dots[(row / 4) * columns + col / 2] |= DOT_BITS[row % 4][col % 2];
            }
        }
    }

    /// Turn the raised dots into text, one line per 4 rows of cells. Every line ends in `\n`.
    pub fn render(&mut self) -> &str {
        self.frame.clear();

        for line in self.dots.chunks(self.columns().max(1)) {
            let chars = line
                .iter()
                .map(|&bits| char::from_u32(BRAILLE_BLANK + bits as u32).unwrap_or(' '));

            self.frame.extend(chars);
            self.frame.push('\n');
        }

        &self.frame
    }

    /// Characters per line
    fn columns(&self) -> usize {
        self.w.div_ceil(2)
    }

    fn set_size(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.dots = vec![0; w.div_ceil(2) * h.div_ceil(4)];
    }

    /// Column and row of `cell` inside the view, if it is visible.
    fn view_position(&self, cell: Cell) -> Option<(usize, usize)> {
        let col = usize::try_from(cell.x.checked_sub(self.x)?).ok()?;
        let row = usize::try_from(cell.y.checked_sub(self.y)?).ok()?;

        (col < self.w && row < self.h).then_some((col, row))
    }
}
