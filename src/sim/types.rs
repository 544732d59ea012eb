use std::fmt;

/// Substance occupying a single cell.
///
/// The declaration order is the wire code sent to clients (`Empty = 0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Material {
    #[default]
    Empty,
    Metal,
    Sand,
    Water,
    Oil,
    Acid,
    Magma,
}

impl Material {
    pub const ALL: [Material; 7] = [
        Material::Empty,
        Material::Metal,
        Material::Sand,
        Material::Water,
        Material::Oil,
        Material::Acid,
        Material::Magma,
    ];

    /// Numeric code used in frame payloads.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Name of the paint tool that places this material.
    pub fn tool_name(self) -> &'static str {
        match self {
            Material::Empty => "Empty",
            Material::Metal => "Metal",
            Material::Sand => "Sand",
            Material::Water => "Water",
            Material::Oil => "Oil",
            Material::Acid => "Acid",
            Material::Magma => "Magma",
        }
    }

    /// Map a tool name coming from the UI to a material. Names are case-sensitive.
    pub fn from_tool_name(tool: &str) -> Option<Material> {
        Material::ALL.into_iter().find(|m| m.tool_name() == tool)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Neighbouring position in `direction`. May fall outside the grid.
    pub fn step(self, direction: Direction) -> Position {
        match direction {
            Direction::Down => Position::new(self.row + 1, self.col),
            Direction::Left => Position::new(self.row, self.col - 1),
            Direction::Right => Position::new(self.row, self.col + 1),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Directions a cell can move in. Rows grow downward; nothing moves up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Left,
    Right,
}

/// What a single tick did to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The selected cell had no applicable move.
    Idle,
    /// `material` swapped places with the cell at `to`.
    Moved {
        material: Material,
        from: Position,
        to: Position,
    },
    /// Acid destroyed `consumed` at `to` and took its place.
    Dissolved {
        from: Position,
        to: Position,
        consumed: Material,
    },
}

impl TickOutcome {
    pub fn is_idle(&self) -> bool {
        matches!(self, TickOutcome::Idle)
    }
}
