use std::io::{self, Bytes, Read, Write};
use std::iter::Peekable;

use coords::{Axis, PointAxial};
use direction::{redirect, Direction};
use grid::{Cmd, Grid};
use memory::{Edge, Memory};

mod coords;
mod direction;
mod grid;
mod memory;

/// Returns a `String` representation of an empty `Grid` with the given side length.
pub fn source_template(size: usize) -> String {
    match size {
        0 => String::new(),
        _ => Grid::new(size).to_string(),
    }
}

/// Parses and runs a string slice of Hexagony source code against the
/// process's standard streams.
///
/// If the `debug_level` is 1, interpreter state is printed to stderr when
/// an instruction with a debug flag is executed.
///
/// If the `debug_level` is 2, interpreter state is printed on every tick.
pub fn run(src: &str, debug_level: u8) -> Result<(), Error> {
    Hexagony::new(src, io::stdin(), io::stdout(), debug_level)?.run()
}

/// A Hexagony interpreter.
///
/// Owns the program grid, the memory grid, and the six instruction
/// pointers, and drives them over the given input and output streams.
pub struct Hexagony<R: Read, W: Write> {
    grid: Grid,
    mem: Memory,
    ips: [Ip; 6],
    ip_idx: usize,
    tick: u64,
    debug_level: u8,
    input: Peekable<Bytes<R>>,
    output: W,
}

/// An instruction pointer.
///
/// Each IP tracks its grid position, its travel direction, and whether a
/// pending `$` makes it skip the next instruction it lands on.
struct Ip {
    coords: PointAxial,
    dir: Direction,
    skip_next: bool,
}

impl Ip {
    fn new(coords: PointAxial, dir: Direction) -> Ip {
        Ip { coords, dir, skip_next: false }
    }
}

impl<R: Read, W: Write> Hexagony<R, W> {
    /// Creates a new Hexagony interpreter with the given source code and
    /// debug level, reading program input from `input` and writing
    /// program output to `output`.
    ///
    /// The six IPs start on the six corners of the program hexagon, each
    /// facing along its edge of the outer ring.
    pub fn new(src: &str, input: R, output: W, debug_level: u8) -> Result<Self, Error> {
        let grid: Grid = src.parse()?;
        let r = grid.size() as isize - 1;
        Ok(Hexagony {
            grid,
            mem: Memory::new(),
            ips: [
                Ip::new(PointAxial(0, -r), Direction::East),
                Ip::new(PointAxial(-r, 0), Direction::SouthEast),
                Ip::new(PointAxial(-r, r), Direction::SouthWest),
                Ip::new(PointAxial(0, r), Direction::West),
                Ip::new(PointAxial(r, 0), Direction::NorthWest),
                Ip::new(PointAxial(r, -r), Direction::NorthEast),
            ],
            ip_idx: 0,
            tick: 0,
            debug_level,
            input: input.bytes().peekable(),
            output,
        })
    }

    /// Runs the interpreter.
    ///
    /// Returns `Ok` if it hit a terminate instruction and `Err` if a
    /// runtime error occurred.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            if self.ips[self.ip_idx].skip_next {
                // A pending `$`: consume the flag and move on without
                // dispatching the instruction under the IP.
                self.ips[self.ip_idx].skip_next = false;
                self.advance_ip();
                self.tick += 1;
                continue;
            }
            let (cmd, dbg) = self.grid.get(self.ips[self.ip_idx].coords);
            let dbg_tick = self.debug_level > 1 || self.debug_level > 0 && dbg;
            if dbg_tick {
                self.print_state(cmd);
            }
            let mut next_idx = self.ip_idx;
            match cmd {
                Cmd::NoOp => (),
                Cmd::Halt => {
                    self.output.flush()?;
                    return Ok(());
                }
                Cmd::Alpha(b) => self.mem.set(Edge::from(b)),
                Cmd::AppendDigit(d) => {
                    let val = self.mem.get_mut();
                    let d = if *val < 0 { -Edge::from(d) } else { Edge::from(d) };
                    *val = val.wrapping_mul(10).wrapping_add(d);
                }
                Cmd::Inc => {
                    let val = self.mem.get_mut();
                    *val = val.wrapping_add(1);
                }
                Cmd::Dec => {
                    let val = self.mem.get_mut();
                    *val = val.wrapping_sub(1);
                }
                Cmd::Sum => self.mem.set(self.mem.get_left().wrapping_add(self.mem.get_right())),
                Cmd::Diff => self.mem.set(self.mem.get_left().wrapping_sub(self.mem.get_right())),
                Cmd::Product => self.mem.set(self.mem.get_left().wrapping_mul(self.mem.get_right())),
                Cmd::Quotient => {
                    let (left, right) = (self.mem.get_left(), self.mem.get_right());
                    if right == 0 {
                        return Err(Error::ZeroDivisionError);
                    }
                    self.mem.set(left.wrapping_div(right));
                }
                Cmd::Remainder => {
                    let (left, right) = (self.mem.get_left(), self.mem.get_right());
                    if right == 0 {
                        return Err(Error::ZeroDivisionError);
                    }
                    self.mem.set(left.wrapping_rem(right));
                }
                Cmd::Neg => {
                    let val = self.mem.get_mut();
                    *val = val.wrapping_neg();
                }
                Cmd::ByteIn => {
                    let value = match self.input.next() {
                        Some(b) => Edge::from(b?),
                        None => -1,
                    };
                    self.mem.set(value);
                }
                Cmd::NumIn => self.read_int()?,
                Cmd::ByteOut => {
                    let byte = self.mem.get().rem_euclid(256) as u8;
                    self.output.write_all(&[byte])?;
                }
                Cmd::NumOut => write!(self.output, "{}", self.mem.get())?,
                Cmd::SkipNext => self.ips[self.ip_idx].skip_next = true,
                Cmd::Deflect(redir) => {
                    let positive = self.mem.get() > 0;
                    let ip = &mut self.ips[self.ip_idx];
                    ip.dir = redirect(ip.dir, redir, positive);
                }
                Cmd::PrevIp => next_idx = (self.ip_idx + 5) % 6, // +5 (= -1 mod 6) to avoid underflow
                Cmd::NextIp => next_idx = (self.ip_idx + 1) % 6,
                Cmd::ChooseIp => next_idx = self.mem.get().rem_euclid(6) as usize,
                Cmd::StepLeft => self.mem.move_left(),
                Cmd::StepRight => self.mem.move_right(),
                Cmd::StepBackLeft => {
                    self.mem.reverse();
                    self.mem.move_right();
                    self.mem.reverse();
                }
                Cmd::StepBackRight => {
                    self.mem.reverse();
                    self.mem.move_left();
                    self.mem.reverse();
                }
                Cmd::FlipMp => self.mem.reverse(),
                Cmd::StepBySign => {
                    if self.mem.get() > 0 {
                        self.mem.move_right()
                    } else {
                        self.mem.move_left()
                    }
                }
                Cmd::CopyBySign => {
                    let value = if self.mem.get() > 0 {
                        self.mem.get_right()
                    } else {
                        self.mem.get_left()
                    };
                    self.mem.set(value);
                }
            }
            if dbg_tick {
                eprintln!("New direction: {}", self.ips[self.ip_idx].dir);
                eprintln!("Memory:\n{}", self.mem);
            }
            // A switch by `[`, `]` or `#` takes effect after the IP that
            // executed it has moved.
            self.advance_ip();
            self.ip_idx = next_idx;
            self.tick += 1;
        }
    }

    /// Consumes input until a sign or digit, then parses a decimal
    /// integer into the current edge. Leaves the edge at 0 on EOF.
    fn read_int(&mut self) -> Result<(), Error> {
        let mut value: Edge = 0;
        let mut sign = 1;
        while let Some(b) = self.input.next() {
            match b? {
                b'+' => break,
                b'-' => {
                    sign = -1;
                    break;
                }
                d @ b'0'..=b'9' => {
                    value = Edge::from(d - b'0');
                    break;
                }
                _ => (),
            }
        }
        while let Some(Ok(d @ b'0'..=b'9')) = self.input.peek() {
            value = value.wrapping_mul(10).wrapping_add(Edge::from(d - b'0'));
            self.input.next();
        }
        self.mem.set(value.wrapping_mul(sign));
        Ok(())
    }

    /// Moves the current IP one hex in its direction. A step that would
    /// leave the program hexagon is reflected to the opposite side;
    /// leaving through a corner branches on the current memory edge.
    fn advance_ip(&mut self) {
        let size = self.grid.size() as isize;
        let positive = self.mem.get() > 0;
        let ip = &mut self.ips[self.ip_idx];
        let PointAxial(p, q) = ip.coords;
        let PointAxial(mut np, mut nq) = ip.coords + ip.dir.to_vector();
        let nr = -np - nq;
        if np.abs() + nq.abs() + nr.abs() >= 2 * size {
            let axis = if np == 0 {
                if positive { Axis::Y } else { Axis::Z }
            } else if nq == 0 {
                if positive { Axis::Z } else { Axis::X }
            } else if nr == 0 {
                if positive { Axis::X } else { Axis::Y }
            } else if nq * nr > 0 {
                Axis::X
            } else if nr * np > 0 {
                Axis::Y
            } else if np * nq > 0 {
                Axis::Z
            } else {
                // Every step off the boundary satisfies one of the six
                // tests above.
                unreachable!("boundary crossing with no reflection axis")
            };
            let PointAxial(wp, wq) = match axis {
                Axis::X => PointAxial(-p, p + q),
                Axis::Y => PointAxial(p + q, -q),
                Axis::Z => PointAxial(-q, -p),
            };
            np = wp;
            nq = wq;
        }
        ip.coords = PointAxial(np, nq);
    }

    /// Prints the tick, every IP, and the command about to run to stderr.
    fn print_state(&self, cmd: Cmd) {
        eprintln!("\nTick {}:", self.tick);
        eprintln!("IPs (! indicates active IP):");
        for (i, ip) in self.ips.iter().enumerate() {
            eprintln!(
                "{} {}: {}, {}{}",
                if self.ip_idx == i { '!' } else { ' ' },
                i,
                ip.coords,
                ip.dir,
                if ip.skip_next { " (skipping)" } else { "" },
            );
        }
        eprintln!("Command: {}", cmd);
    }
}

/// Error type returned by functions in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unrecognized character in source code: {0}")]
    SyntaxError(char),
    #[error(transparent)]
    IOError(#[from] io::Error),
    #[error("Division by zero")]
    ZeroDivisionError,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs a program to completion and returns everything it wrote.
    fn exec(src: &str, input: &[u8]) -> Vec<u8> {
        let mut output = Vec::new();
        Hexagony::new(src, input, &mut output, 0)
            .expect("program should parse")
            .run()
            .expect("program should terminate cleanly");
        output
    }

    fn exec_err(src: &str, input: &[u8]) -> Error {
        let mut output = Vec::new();
        Hexagony::new(src, input, &mut output, 0)
            .expect("program should parse")
            .run()
            .expect_err("program should abort")
    }

    #[test]
    fn terminates_immediately() {
        assert_eq!(exec("@", b""), b"");
    }

    #[test]
    fn prints_the_zero_edge() {
        assert_eq!(exec("!@", b""), b"0");
    }

    #[test]
    fn prints_a_single_digit() {
        assert_eq!(exec("1!@", b""), b"1");
    }

    #[test]
    fn digits_accumulate_away_from_zero() {
        assert_eq!(exec("32;@", b""), b" ");
        assert_eq!(exec("1~2!@", b""), b"-12");
    }

    #[test]
    fn letters_load_their_ascii_value() {
        assert_eq!(exec("A;@", b""), b"A");
    }

    #[test]
    fn increment_decrement_negate() {
        assert_eq!(exec(")))!@", b""), b"3");
        assert_eq!(exec("((!@", b""), b"-2");
        assert_eq!(exec("5~!@", b""), b"-5");
    }

    #[test]
    fn echoes_stdin_byte() {
        assert_eq!(exec(",;@", b"A"), b"A");
    }

    #[test]
    fn read_byte_eof_yields_minus_one() {
        // -1 written back through the mod-256 byte output is 0xFF
        assert_eq!(exec(",;@", b""), vec![0xFF]);
    }

    #[test]
    fn read_int_scans_for_a_signed_number() {
        assert_eq!(exec("?!@", b"  ab-42xy"), b"-42");
        assert_eq!(exec("?!@", b""), b"0");
    }

    #[test]
    fn jump_skips_across_a_wrap() {
        // `$` carries the IP over the `@` next to it; the wrapped path
        // then prints before hitting the second `@`.
        assert_eq!(exec("$@!@", b""), b"0");
    }

    #[test]
    fn neighbour_arithmetic() {
        // `3}5"` leaves 5 on the left neighbour and 3 on the right
        assert_eq!(exec("3}5\"+!@", b""), b"8");
        assert_eq!(exec("3}5\"-!@", b""), b"2");
        assert_eq!(exec("3}5\"*!@", b""), b"15");
        assert_eq!(exec("2}6\":!@", b""), b"3");
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(exec("2}\\/7<..>~\"\\/!:<>@.", b""), b"-3");
    }

    #[test]
    fn modulo_takes_the_sign_of_the_left_operand() {
        assert_eq!(exec("2}\\/7<..>~\"\\/!%<>@.", b""), b"-1");
    }

    #[test]
    fn division_by_zero_aborts() {
        match exec_err(":@", b"") {
            Error::ZeroDivisionError => (),
            other => panic!("expected division error, got {:?}", other),
        }
    }

    #[test]
    fn mem_copy_follows_edge_sign() {
        // Current edge is 0 after `"`, so `&` copies the left neighbour
        assert_eq!(exec("3}5\"&!@", b""), b"5");
    }

    #[test]
    fn mp_branch_follows_edge_sign() {
        // `+` leaves 8 on the current edge; `^` then moves right onto 3
        assert_eq!(exec("3}\\/5<..>\"+\\/!^<>@.", b""), b"3");
        // Negated, `^` moves left onto 5
        assert_eq!(exec("3}\\/5<..>\"+\\/^~<>!@", b""), b"5");
    }

    #[test]
    fn next_ip_starts_at_the_north_east_corner() {
        // `]` hands control to IP 1, which prints and terminates
        assert_eq!(exec("]!@@@@@", b""), b"0");
    }

    #[test]
    fn ip_select_uses_the_edge_value() {
        // Edge 3 selects IP 3, which starts on the south-east corner
        // moving west across `!` and `@`
        assert_eq!(exec("3#...@!", b""), b"3");
    }

    #[test]
    fn edges_wrap_like_32_bit_integers() {
        assert_eq!(
            exec("214\\/47<..>836\\/!)74<.>@...\\/...<>...", b""),
            b"-2147483648"
        );
    }

    #[test]
    fn hello_world() {
        // The classic hello-world encoding: letters load themselves and
        // the punctuation comes from letter/digit pairs reduced mod 256
        // (`Q2` = 812 = ',', `P0` = 800 = ' ', `P1` = '!', `M8` = '\n'),
        // threaded through the hexagon on a mirrored course.
        let src = "H;e;\\/l;l<..>;o;Q\\/;0P;2<..>W;o;r;\\/1P;d;l<>;M8;@\\/....<>....";
        assert_eq!(exec(src, b""), b"Hello, World!\n");
    }

    #[test]
    fn hello_world_with_layout() {
        // The same program laid out as its hexagon; the parser strips
        // the indentation and row breaks
        let src = "
    H ; e ; \\
   / l ; l < .
  . > ; o ; Q \\
 / ; 0 P ; 2 < .
. > W ; o ; r ; \\
 / 1 P ; d ; l <
  > ; M 8 ; @ \\
   / . . . . <
    > . . . .
";
        assert_eq!(exec(src, b""), b"Hello, World!\n");
    }
}
