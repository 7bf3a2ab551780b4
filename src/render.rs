use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

use crate::board::Board;
use crate::solver::Solution;
use crate::tile::Tile;

/// Console output for boards and solutions.
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint<W: Write>(&self, out: &mut W, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            write!(out, "{}", text)
        }
    }

    /// Aligned grid; tiles already at home are green, misplaced ones yellow.
    pub fn board<W: Write>(&self, out: &mut W, board: &Board) -> io::Result<()> {
        let width = (board.rows() * board.cols() - 1).to_string().len();

        for (i, row) in board.grid().iter().enumerate() {
            for (j, tile) in row.iter().enumerate() {
                let color = match tile {
                    Tile::Empty => Color::DarkGrey,
                    Tile::Number(n) if *n as usize == i * board.cols() + j + 1 => Color::Green,
                    Tile::Number(_) => Color::Yellow,
                };
                let text = format!("{:>width$} ", tile.to_string(), width = width);
                self.paint(out, color, &text)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Initial board, then each move followed by the board it produces.
    pub fn solution<W: Write>(&self, out: &mut W, solution: &Solution) -> io::Result<()> {
        if let Some(initial) = solution.boards.first() {
            writeln!(out, "Initial board:")?;
            self.board(out, initial)?;
            writeln!(out)?;
        }

        for (action, board) in solution.actions.iter().zip(solution.boards.iter().skip(1)) {
            if self.color {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            self.paint(out, Color::Cyan, &action.to_string())?;
            if self.color {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
            writeln!(out)?;
            self.board(out, board)?;
            writeln!(out)?;
        }

        let stats = &solution.stats;
        writeln!(
            out,
            "Solved in {} moves (expanded {}, generated {}, peak frontier {})",
            solution.len(),
            stats.expanded,
            stats.generated,
            stats.max_frontier
        )?;
        out.flush()
    }
}
