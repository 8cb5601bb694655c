//! Field schemas: which kind of value each property field holds.

/// The kind of value a property field holds, and how raw edits are coerced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text, stored verbatim
    Text,
    /// Hex color string (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`)
    Color,
    /// Integer clamped into `[min, max]`
    Int { min: i64, max: i64 },
    /// Float clamped into `[min, max]`
    Float { min: f64, max: f64 },
    /// One of a fixed set of options
    Choice(&'static [&'static str]),
    /// Newline-delimited list, blank lines dropped
    Lines,
    /// Comma-delimited list, empty tokens kept
    Tokens,
    /// Rows of comma-delimited cells
    Table,
    /// List of records sharing one key set
    Records(&'static [RecordKey]),
}

impl FieldKind {
    pub const fn int(min: i64, max: i64) -> Self {
        FieldKind::Int { min, max }
    }

    pub const fn float(min: f64, max: f64) -> Self {
        FieldKind::Float { min, max }
    }

    /// Whether a text value is acceptable for this kind as-is
    pub fn accepts_text(&self, value: &str) -> bool {
        match self {
            FieldKind::Text => true,
            FieldKind::Color => is_hex_color(value),
            FieldKind::Choice(options) => options.contains(&value),
            _ => false,
        }
    }
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// One key of a record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordKey {
    pub name: &'static str,
    /// Boolean key (e.g. `enabled`) rather than text
    pub flag: bool,
}

impl RecordKey {
    pub const fn text(name: &'static str) -> Self {
        Self { name, flag: false }
    }

    pub const fn flag(name: &'static str) -> Self {
        Self { name, flag: true }
    }
}

/// A named field of a component's property shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}
