use std::fmt;

/// Resolved type of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "Int",
            Type::Float => "Float",
        }
    }

    /// The type a numeral natively produces: `Float` when written with a
    /// decimal point, `Int` otherwise.
    pub fn of_numeral(text: &str) -> Type {
        if text.contains('.') {
            Type::Float
        } else {
            Type::Int
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
