use std::{fmt, str::FromStr};

use crate::{coords::{hex_count, PointAxial}, direction::Redirect, Error};
use Cmd::*;

/// A pointy-topped hexagonal grid of instructions.
///
/// Cells live in a flat array scanned row-major along the `z` axis: rows
/// of constant `z` from `z = size - 1` down to `-(size - 1)`, by
/// increasing `q` within each row. The grid never changes after parsing.
pub struct Grid {
    size: usize,
    cells: Vec<(Cmd, bool)>,
}

impl Grid {
    /// Creates an empty `Grid` of the given side length.
    pub fn new(size: usize) -> Grid {
        Grid { size, cells: vec![(NoOp, false); hex_count(size)] }
    }

    /// Returns the side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the command and debug flag at the given grid coordinates.
    ///
    /// Panics outside the hexagon; the wrap rule keeps every IP in
    /// bounds.
    pub fn get(&self, coords: PointAxial) -> (Cmd, bool) {
        match self.index(coords) {
            Some(i) => self.cells[i],
            None => panic!("IP escaped the grid at {}", coords),
        }
    }

    /// Flat index of an axial coordinate, or `None` outside the hexagon.
    fn index(&self, coords: PointAxial) -> Option<usize> {
        let PointAxial(p, q) = coords;
        let size = self.size as isize;
        let (y, z) = (q, coords.z());
        if p.abs() + q.abs() + z.abs() > 2 * (size - 1) {
            return None;
        }
        let i = 3 * size * (size - 1) / 2 + y - z * (2 * size - 1) + z * (z.abs() + 1) / 2;
        Some(i as usize)
    }
}

/// One instruction of the program grid.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Cmd {
    NoOp,
    /// `@` stops the interpreter.
    Halt,
    /// A letter stores its own character code into the current edge.
    Alpha(u8),
    /// A digit shifts the current edge one decimal place and appends
    /// itself, pushing the value away from zero.
    AppendDigit(u8),
    Inc,
    Dec,
    /// `+`, `-` and `*` combine the neighbour edges into the current one.
    Sum,
    Diff,
    Product,
    /// `:` divides left by right, truncating toward zero.
    Quotient,
    /// `%` keeps the remainder of that division, signed like the left
    /// operand.
    Remainder,
    Neg,
    /// `,` reads one byte, leaving -1 at end of input.
    ByteIn,
    /// `?` scans ahead for an optionally signed decimal number, leaving
    /// 0 at end of input.
    NumIn,
    /// `;` emits the current edge reduced to a byte.
    ByteOut,
    /// `!` emits the current edge in decimal.
    NumOut,
    /// `$` makes the active IP pass over the next cell on its path.
    SkipNext,
    /// A mirror or branch bends the active IP's direction.
    Deflect(Redirect),
    PrevIp,
    NextIp,
    /// `#` activates the IP numbered by the current edge mod 6.
    ChooseIp,
    StepLeft,
    StepRight,
    StepBackLeft,
    StepBackRight,
    /// `=` turns the MP around in place.
    FlipMp,
    /// `^` steps the MP right on a positive edge and left otherwise.
    StepBySign,
    /// `&` copies the right neighbour on a positive edge and the left
    /// one otherwise.
    CopyBySign,
}

impl Cmd {
    /// Classifies one source character. Letters and digits carry their
    /// payload; anything outside the instruction set maps to `None`.
    fn from_char(c: char) -> Option<Cmd> {
        Some(match c {
            'a'..='z' | 'A'..='Z' => Alpha(c as u8),
            '0'..='9' => AppendDigit(c as u8 - b'0'),
            '.' => NoOp,
            '@' => Halt,
            ')' => Inc,
            '(' => Dec,
            '+' => Sum,
            '-' => Diff,
            '*' => Product,
            ':' => Quotient,
            '%' => Remainder,
            '~' => Neg,
            ',' => ByteIn,
            '?' => NumIn,
            ';' => ByteOut,
            '!' => NumOut,
            '$' => SkipNext,
            '_' => Deflect(Redirect::MirrorHori),
            '|' => Deflect(Redirect::MirrorVert),
            '/' => Deflect(Redirect::MirrorForw),
            '\\' => Deflect(Redirect::MirrorBack),
            '<' => Deflect(Redirect::BranchLeft),
            '>' => Deflect(Redirect::BranchRight),
            '[' => PrevIp,
            ']' => NextIp,
            '#' => ChooseIp,
            '{' => StepLeft,
            '}' => StepRight,
            '"' => StepBackLeft,
            '\'' => StepBackRight,
            '=' => FlipMp,
            '^' => StepBySign,
            '&' => CopyBySign,
            _ => return None,
        })
    }

    /// The source character this command renders back to.
    fn to_char(self) -> char {
        match self {
            Alpha(b) => b as char,
            AppendDigit(d) => (d + b'0') as char,
            NoOp => '.',
            Halt => '@',
            Inc => ')',
            Dec => '(',
            Sum => '+',
            Diff => '-',
            Product => '*',
            Quotient => ':',
            Remainder => '%',
            Neg => '~',
            ByteIn => ',',
            NumIn => '?',
            ByteOut => ';',
            NumOut => '!',
            SkipNext => '$',
            Deflect(Redirect::MirrorHori) => '_',
            Deflect(Redirect::MirrorVert) => '|',
            Deflect(Redirect::MirrorForw) => '/',
            Deflect(Redirect::MirrorBack) => '\\',
            Deflect(Redirect::BranchLeft) => '<',
            Deflect(Redirect::BranchRight) => '>',
            PrevIp => '[',
            NextIp => ']',
            ChooseIp => '#',
            StepLeft => '{',
            StepRight => '}',
            StepBackLeft => '"',
            StepBackRight => '\'',
            FlipMp => '=',
            StepBySign => '^',
            CopyBySign => '&',
        }
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        // Find the size of the smallest regular hexagon that will contain the code
        let src_len = s.chars().filter(|&c| !c.is_whitespace() && c != '`').count();
        let size = (1..).find(|&n| hex_count(n) >= src_len).unwrap();
        let mut grid = Grid::new(size);
        // Write each command into the grid in scan order; unused trailing
        // cells keep their no-op fill
        let mut i = 0;
        let mut debug = false;
        for c in s.chars() {
            if c.is_whitespace() {
                continue;
            }
            if c == '`' {
                debug = true;
                continue;
            }
            match Cmd::from_char(c) {
                Some(cmd) => grid.cells[i] = (cmd, debug),
                None => return Err(Error::SyntaxError(c)),
            }
            debug = false;
            i += 1;
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diameter = 2 * self.size - 1;
        let mut i = 0;
        for row in 0..diameter {
            // Pad lines with whitespace for hex shape
            let pad = (row as isize - (self.size as isize - 1)).abs() as usize;
            write!(f, "{}", " ".repeat(pad))?;
            for _ in 0..diameter - pad {
                let (cmd, dbg) = self.cells[i];
                write!(f, "{}{}", if dbg { '`' } else { ' ' }, cmd)?;
                i += 1;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
