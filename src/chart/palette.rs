//! Bar colors per sentiment label

/// Fill and border color of one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarColors {
    pub fill: &'static str,
    pub border: &'static str,
}

/// Teal, for "POSITIVO"
pub const POSITIVE_COLORS: BarColors = BarColors {
    fill: "rgba(75, 192, 192, 0.2)",
    border: "rgba(75, 192, 192, 1)",
};

/// Red, for "NEGATIVO"
pub const NEGATIVE_COLORS: BarColors = BarColors {
    fill: "rgba(255, 99, 132, 0.2)",
    border: "rgba(255, 99, 132, 1)",
};

/// Grey, for every other label
pub const NEUTRAL_COLORS: BarColors = BarColors {
    fill: "rgba(108, 117, 125, 0.2)",
    border: "rgba(108, 117, 125, 1)",
};

/// Colors for a label. Exact, case-sensitive match.
pub fn colors_for(label: &str) -> BarColors {
    match label {
        "POSITIVO" => POSITIVE_COLORS,
        "NEGATIVO" => NEGATIVE_COLORS,
        _ => NEUTRAL_COLORS,
    }
}
