//! Breakpoint table for `@include media(...)`.
//!
//! Only the include-media comparisons used with the fe-brary breakpoints are
//! understood. The table is fixed: four breakpoints, four comparisons each.
//!
//! ```text
//! mobile: 320px   tablet: global.tabletMinWidth
//! desktop: global.desktopMinWidth   lrg-desktop: global.desktopMaxWidth
//! ```

/// Comparison operator in a media expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
}

impl Comparison {
    /// Media feature the comparison maps to.
    pub fn feature(self) -> &'static str {
        match self {
            Comparison::Greater | Comparison::GreaterOrEqual => "min-width",
            Comparison::Less | Comparison::LessOrEqual => "max-width",
        }
    }
}

/// Named breakpoints, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
    LargeDesktop,
}

impl Breakpoint {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mobile" => Some(Breakpoint::Mobile),
            "tablet" => Some(Breakpoint::Tablet),
            "desktop" => Some(Breakpoint::Desktop),
            "lrg-desktop" => Some(Breakpoint::LargeDesktop),
            _ => None,
        }
    }
}

/// Right-hand side of a media condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Plain pixel value.
    Pixels(u32),
    /// `global.<name>` from the fe-brary variables, adjusted by `offset` pixels.
    Variable { name: &'static str, offset: i32 },
}

/// A resolved media condition, e.g. `(min-width: 321px)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaCondition {
    pub feature: &'static str,
    pub bound: Bound,
}

impl MediaCondition {
    /// Render as at-rule params. `namespace` is the fe-brary variables binding.
    pub fn to_params(&self, namespace: &str) -> String {
        let value = match self.bound {
            Bound::Pixels(px) => format!("{px}px"),
            Bound::Variable { name, offset } => match offset {
                0 => format!("${{{namespace}.global.{name}}}"),
                n if n > 0 => format!("${{{namespace}.global.{name} + {n}}}"),
                n => format!("${{{namespace}.global.{name} - {}}}", -n),
            },
        };
        format!("({}: {value})", self.feature)
    }

    pub fn uses_variables(&self) -> bool {
        matches!(self.bound, Bound::Variable { .. })
    }
}

const fn px(feature: &'static str, value: u32) -> MediaCondition {
    MediaCondition {
        feature,
        bound: Bound::Pixels(value),
    }
}

const fn var(feature: &'static str, name: &'static str, offset: i32) -> MediaCondition {
    MediaCondition {
        feature,
        bound: Bound::Variable { name, offset },
    }
}

const MIN: &str = "min-width";
const MAX: &str = "max-width";

/// Every supported `(comparison, breakpoint)` pair.
pub const TABLE: [(Comparison, Breakpoint, MediaCondition); 16] = [
    (Comparison::Greater, Breakpoint::Mobile, px(MIN, 321)),
    (Comparison::GreaterOrEqual, Breakpoint::Mobile, px(MIN, 320)),
    (Comparison::Greater, Breakpoint::Tablet, var(MIN, "tabletMinWidth", 1)),
    (Comparison::GreaterOrEqual, Breakpoint::Tablet, var(MIN, "tabletMinWidth", 0)),
    (Comparison::Greater, Breakpoint::Desktop, var(MIN, "desktopMinWidth", 1)),
    (Comparison::GreaterOrEqual, Breakpoint::Desktop, var(MIN, "desktopMinWidth", 0)),
    (Comparison::Greater, Breakpoint::LargeDesktop, var(MIN, "desktopMaxWidth", 1)),
    (Comparison::GreaterOrEqual, Breakpoint::LargeDesktop, var(MIN, "desktopMaxWidth", 0)),
    (Comparison::Less, Breakpoint::Mobile, px(MAX, 319)),
    (Comparison::LessOrEqual, Breakpoint::Mobile, px(MAX, 320)),
    (Comparison::Less, Breakpoint::Tablet, var(MAX, "tabletMinWidth", -1)),
    (Comparison::LessOrEqual, Breakpoint::Tablet, var(MAX, "tabletMinWidth", 0)),
    (Comparison::Less, Breakpoint::Desktop, var(MAX, "desktopMinWidth", -1)),
    (Comparison::LessOrEqual, Breakpoint::Desktop, var(MAX, "desktopMinWidth", 0)),
    (Comparison::Less, Breakpoint::LargeDesktop, var(MAX, "desktopMaxWidth", -1)),
    (Comparison::LessOrEqual, Breakpoint::LargeDesktop, var(MAX, "desktopMaxWidth", 0)),
];

/// Look up a pair in [`TABLE`].
pub fn lookup(comparison: Comparison, breakpoint: Breakpoint) -> Option<MediaCondition> {
    TABLE
        .iter()
        .find(|(c, b, _)| *c == comparison && *b == breakpoint)
        .map(|(_, _, condition)| *condition)
}

/// Parse a media expression such as `'>=tablet'` (quotes optional).
pub fn parse_expression(expression: &str) -> Option<(Comparison, Breakpoint)> {
    let expr = expression.trim();
    let expr = expr
        .strip_prefix('\'')
        .and_then(|e| e.strip_suffix('\''))
        .or_else(|| expr.strip_prefix('"').and_then(|e| e.strip_suffix('"')))
        .unwrap_or(expr)
        .trim();

    let (comparison, name) = if let Some(rest) = expr.strip_prefix(">=") {
        (Comparison::GreaterOrEqual, rest)
    } else if let Some(rest) = expr.strip_prefix("<=") {
        (Comparison::LessOrEqual, rest)
    } else if let Some(rest) = expr.strip_prefix('>') {
        (Comparison::Greater, rest)
    } else if let Some(rest) = expr.strip_prefix('<') {
        (Comparison::Less, rest)
    } else {
        return None;
    };

    Breakpoint::from_name(name.trim()).map(|b| (comparison, b))
}

/// Resolve the argument list of a `media(...)` call to a condition.
pub fn resolve(arguments: &str) -> Option<MediaCondition> {
    let (comparison, breakpoint) = parse_expression(arguments)?;
    lookup(comparison, breakpoint)
}
