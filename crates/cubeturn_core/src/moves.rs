//! Compiling move notation into layer turns.

use std::fmt;

use cubemath::prelude::*;
use cubeturn_notation::{Modifier, NotatedMove};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::CompileError;

/// Quarter turn of a single layer.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Move {
    /// Axis of rotation.
    pub axis: Axis,
    /// Rounded coordinate of the layer along the axis.
    pub coordinate: i32,
    /// Angle of rotation around the positive end of the axis, in radians.
    /// This is always `±π/2` for compiled moves.
    pub angle: Float,
}
impl Move {
    /// Returns the number of counterclockwise quarter turns.
    pub fn quarter_turns(&self) -> i32 {
        quarter_turns(self.angle)
    }
    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            angle: -self.angle,
            ..self
        }
    }
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {:+}", self.axis, self.coordinate, self.quarter_turns())
    }
}

/// Compiles a single move for a puzzle of the given size.
///
/// Half turns compile to two identical quarter turns.
pub fn compile_move(size: u8, notated: NotatedMove) -> Result<SmallVec<[Move; 2]>, CompileError> {
    crate::check_size(size)?;
    if notated.wide && size < 4 {
        return Err(CompileError::WideMoveUnsupported {
            token: notated.to_string(),
            size,
        });
    }

    let face = notated.face;
    let mut row = face.sign().int();
    if size > 3 && !notated.wide {
        row *= 2;
    }
    let direction = match notated.modifier {
        Modifier::Prime => -1.0,
        Modifier::None | Modifier::Double => 1.0,
    };
    let mv = Move {
        axis: face.axis(),
        coordinate: row,
        angle: QUARTER_TURN * -Sign::of_int(row).float() * direction,
    };

    Ok(match notated.modifier {
        Modifier::Double => smallvec![mv, mv],
        Modifier::None | Modifier::Prime => smallvec![mv],
    })
}

/// Compiles a sequence of moves for a puzzle of the given size.
pub fn compile_moves(
    size: u8,
    moves: impl IntoIterator<Item = NotatedMove>,
) -> Result<Vec<Move>, CompileError> {
    let mut ret = vec![];
    for notated in moves {
        ret.extend(compile_move(size, notated)?);
    }
    Ok(ret)
}

/// Parses and compiles a space-separated script for a puzzle of the given
/// size. Nothing is compiled unless the whole script is valid.
pub fn compile_notation(size: u8, script: &str) -> Result<Vec<Move>, CompileError> {
    compile_moves(size, cubeturn_notation::parse_notation(script)?)
}
