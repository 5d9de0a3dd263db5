//! CSS length values resolved from the theme.

use cssparser::{ParseError, Parser, ParserInput, Token};

/// Units accepted as absolute or relative lengths.
const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "lh", "rlh", "vw", "vh", "vmin", "vmax", "svw", "svh", "lvw",
    "lvh", "dvw", "dvh", "cqw", "cqh", "cqi", "cqb", "cqmin", "cqmax", "cm", "mm", "q", "in", "pt",
    "pc",
];

/// Functions whose result is treated as a length without evaluation.
const LENGTH_FUNCTIONS: &[&str] = &["calc", "min", "max", "clamp", "var", "env"];

/// A validated CSS length, kept in its source form.
///
/// Accepts a dimension with a length unit, a percentage, a unitless `0`, or
/// one of the math functions (`calc()`, `clamp()`, ...) and `var()`.
///
/// # Example
///
/// ```
/// use iconmask::theme::CssLength;
///
/// let length = CssLength::parse("2.5rem").unwrap();
/// assert_eq!(length.as_str(), "2.5rem");
/// assert_eq!(CssLength::rem(0.25).as_str(), "0.25rem");
/// assert!(CssLength::parse("red").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssLength(String);

impl CssLength {
    /// Parse and validate a length.
    ///
    /// The error is a human readable reason.
    pub fn parse(value: &str) -> std::result::Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("empty value".to_string());
        }

        let mut input = ParserInput::new(value);
        let mut parser = Parser::new(&mut input);
        let result: std::result::Result<(), ParseError<'_, ()>> =
            parser.parse_entirely(parse_length);

        match result {
            Ok(()) => Ok(Self(value.to_string())),
            Err(e) => Err(format!("{:?}", e.kind)),
        }
    }

    /// A pixel length.
    pub fn px(value: f64) -> Self {
        Self(format!("{value}px"))
    }

    /// A root-relative length.
    pub fn rem(value: f64) -> Self {
        if value == 0.0 {
            return Self("0px".to_string());
        }
        Self(format!("{value}rem"))
    }

    /// The CSS text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CssLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_length<'i>(parser: &mut Parser<'i, '_>) -> std::result::Result<(), ParseError<'i, ()>> {
    let location = parser.current_source_location();
    let function = match parser.next()? {
        Token::Dimension { unit, .. }
            if LENGTH_UNITS.iter().any(|u| unit.eq_ignore_ascii_case(u)) =>
        {
            return Ok(());
        }
        Token::Number { value, .. } if *value == 0.0 => return Ok(()),
        Token::Percentage { .. } => return Ok(()),
        Token::Function(name)
            if LENGTH_FUNCTIONS.iter().any(|f| name.eq_ignore_ascii_case(f)) =>
        {
            name.clone()
        }
        token => {
            let token = token.clone();
            return Err(location.new_unexpected_token_error(token));
        }
    };

    tracing::trace!("Accepting {}() as a length without evaluating it", function);
    parser.parse_nested_block(|block| {
        while !block.is_exhausted() {
            block.next()?;
        }
        Ok(())
    })
}
