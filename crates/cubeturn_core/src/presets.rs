//! Built-in patterns.

use crate::{CompileError, PuzzleModel, compile_notation};

/// Built-in pattern that can be applied to a solved puzzle.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumString, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Preset {
    /// Solved puzzle.
    Solved,
    /// Half turns of every outer layer. On a 3×3×3 every face shows a
    /// checkerboard of itself and its opposite face.
    Checkerboard,
}
impl Preset {
    /// Returns the moves that produce the pattern from a solved puzzle.
    pub fn notation(self) -> &'static str {
        match self {
            Preset::Solved => "",
            Preset::Checkerboard => "U2 D2 F2 B2 L2 R2",
        }
    }

    /// Returns a new puzzle showing the pattern.
    pub fn build(self, size: u8) -> Result<PuzzleModel, CompileError> {
        let moves = compile_notation(size, self.notation())?;
        let mut model = PuzzleModel::new(size)?;
        if let Err(e) = model.apply_moves(&moves) {
            cubemath::debug_panic!("error applying preset {self}: {e}");
        }
        Ok(model)
    }
}
