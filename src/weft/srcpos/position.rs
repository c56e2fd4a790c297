//! The position value attached to every parsed construct.
//!
//! A [`Position`] names the file and 1-based line a construct was scanned
//! from, and optionally carries the raw text of that line for diagnostic
//! display. Positions come in three shapes: *known* (a real line number),
//! *unknown* (the default value, used before a location is established or
//! when none exists), and *memory-synthesized* (built from an in-memory
//! key/value pair that never had source text, see
//! [`Position::from_key_val`]).

use std::fmt;
use std::num::NonZeroUsize;

/// A location in weft source text.
///
/// The string formats produced by [`as_compact_string`] and friends are
/// consumed verbatim by error printing, so they are part of the crate's
/// public output surface.
///
/// [`as_compact_string`]: Position::as_compact_string
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// 1-based; `Some` exactly when the position is known.
    line_num: Option<NonZeroUsize>,
    file: String,
    line: String,
    from_memory: bool,
}

impl Position {
    /// Create a known position. Line numbers are 1-based.
    ///
    /// # Panics
    ///
    /// Panics if `line_num` is zero.
    pub fn new(line_num: usize) -> Self {
        let line_num = match NonZeroUsize::new(line_num) {
            Some(n) => n,
            None => panic!("line numbers are 1-based"),
        };
        Self {
            line_num: Some(line_num),
            ..Self::default()
        }
    }

    /// Create an unknown position, equivalent to the default value.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Create a position for a value that exists only in memory.
    ///
    /// The rendered line reads like an assignment, `<key><separator>
    /// <value>`, with the value in its `Debug` quoting so control
    /// characters cannot leak into diagnostics. The position stays
    /// unknown; [`is_from_memory`](Position::is_from_memory) reports true.
    pub fn from_key_val(
        key: impl fmt::Display,
        value: impl fmt::Debug,
        separator: &str,
    ) -> Self {
        Self {
            line: format!("{}{} {:?}", key, separator, value),
            from_memory: true,
            ..Self::default()
        }
    }

    /// Attach the file this position belongs to.
    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = file.into();
    }

    /// Attach the raw text of the source line.
    pub fn set_line(&mut self, line: impl Into<String>) {
        self.line = line.into();
    }

    pub fn is_known(&self) -> bool {
        self.line_num.is_some()
    }

    pub fn is_from_memory(&self) -> bool {
        self.from_memory
    }

    /// The 1-based line number.
    ///
    /// # Panics
    ///
    /// Panics if the position is unknown; check
    /// [`is_known`](Position::is_known) first.
    pub fn line_num(&self) -> usize {
        match self.line_num {
            Some(n) => n.get(),
            None => panic!("position is unknown"),
        }
    }

    /// The captured source line text, or `""` when none was recorded.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The file name, or `""` when no file is associated.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// `<file>:<N>`, with the file part omitted when empty and `?`
    /// standing in for an unknown line number.
    pub fn as_compact_string(&self) -> String {
        let mut out = self.file.clone();
        if !out.is_empty() {
            out.push(':');
        }
        match self.line_num {
            Some(n) => out.push_str(&n.to_string()),
            None => out.push('?'),
        }
        out
    }

    /// The compact form with a `line ` prefix, as error messages quote it.
    pub fn as_string(&self) -> String {
        format!("line {}", self.as_compact_string())
    }

    /// The bare line number as a decimal string, or `?` when unknown.
    pub fn as_int_string(&self) -> String {
        match self.line_num {
            Some(n) => n.to_string(),
            None => "?".to_string(),
        }
    }

    /// The line number right-aligned in a 4-character field, or `????`
    /// when unknown. Used for gutter columns in source excerpts.
    pub fn as_4digit_string(&self) -> String {
        match self.line_num {
            Some(n) => format!("{:>4}", n.get()),
            None => "????".to_string(),
        }
    }

    /// Clone this position with the line number moved `offset` lines
    /// later, for fragments spliced into a larger document. Fragments are
    /// only ever inserted later in a stream, so there is no backward
    /// variant.
    ///
    /// # Panics
    ///
    /// Panics if the position is unknown, or if the sum overflows.
    pub fn with_line_offset(&self, offset: usize) -> Self {
        let line_num = match self.line_num {
            Some(n) => n,
            None => panic!("position is unknown"),
        };
        let line_num = match line_num.checked_add(offset) {
            Some(n) => n,
            None => panic!("line offset overflows"),
        };
        Self {
            line_num: Some(line_num),
            ..self.clone()
        }
    }

    /// Whether `other` is on the same line as this position or the line
    /// directly above or below it, in the same file. Unknown positions are
    /// never next to anything.
    pub fn is_next_to(&self, other: &Position) -> bool {
        match (self.line_num, other.line_num) {
            (Some(a), Some(b)) => self.file == other.file && a.get().abs_diff(b.get()) <= 1,
            _ => false,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_compact_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_positions_are_known() {
        let pos = Position::new(7);
        assert!(pos.is_known());
        assert_eq!(pos.line_num(), 7);
        assert!(!pos.is_from_memory());
        assert_eq!(pos.file(), "");
        assert_eq!(pos.line(), "");
    }

    #[test]
    #[should_panic(expected = "1-based")]
    fn zero_line_number_is_rejected() {
        Position::new(0);
    }

    #[test]
    fn unknown_position_is_the_default() {
        assert_eq!(Position::unknown(), Position::default());
        assert!(!Position::unknown().is_known());
        assert!(!Position::unknown().is_from_memory());
    }

    #[test]
    #[should_panic(expected = "unknown")]
    fn line_num_of_unknown_position_panics() {
        Position::unknown().line_num();
    }

    #[test]
    fn key_val_positions_render_like_assignments() {
        let pos = Position::from_key_val("region", "us-east-1", "=");
        assert!(pos.is_from_memory());
        assert!(!pos.is_known());
        assert_eq!(pos.line(), "region= \"us-east-1\"");
        assert_eq!(pos.file(), "");
    }

    #[test]
    fn key_val_accepts_non_string_values() {
        let pos = Position::from_key_val("replicas", 3, ":");
        assert_eq!(pos.line(), "replicas: 3");
    }

    #[test]
    fn key_val_escapes_control_characters() {
        let pos = Position::from_key_val("motd", "hi\nthere", ":");
        assert_eq!(pos.line(), "motd: \"hi\\nthere\"");
    }

    #[test]
    fn setters_populate_file_and_line() {
        let mut pos = Position::new(3);
        pos.set_file("vars.weft");
        pos.set_line("  replicas: 3");
        assert_eq!(pos.file(), "vars.weft");
        assert_eq!(pos.line(), "  replicas: 3");
    }

    #[test]
    fn clones_are_independent() {
        let mut original = Position::new(4);
        original.set_file("base.weft");
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_file("overlay.weft");
        let moved = copy.with_line_offset(10);
        assert_eq!(original.line_num(), 4);
        assert_eq!(original.file(), "base.weft");
        assert_eq!(moved.line_num(), 14);
        assert_eq!(moved.file(), "overlay.weft");
    }

    #[test]
    fn offset_copies_keep_file_and_line_text() {
        let mut pos = Position::new(2);
        pos.set_file("fragment.weft");
        pos.set_line("stages:");
        let spliced = pos.with_line_offset(40);
        assert_eq!(spliced.line_num(), 42);
        assert_eq!(spliced.file(), "fragment.weft");
        assert_eq!(spliced.line(), "stages:");
    }

    #[test]
    fn zero_offset_is_allowed() {
        assert_eq!(Position::new(9).with_line_offset(0).line_num(), 9);
    }

    #[test]
    #[should_panic(expected = "unknown")]
    fn offsetting_an_unknown_position_panics() {
        Position::unknown().with_line_offset(1);
    }

    #[test]
    fn adjacency_spans_one_line_either_way() {
        let at = |line| {
            let mut pos = Position::new(line);
            pos.set_file("main.weft");
            pos
        };
        assert!(at(5).is_next_to(&at(4)));
        assert!(at(5).is_next_to(&at(5)));
        assert!(at(5).is_next_to(&at(6)));
        assert!(!at(5).is_next_to(&at(3)));
        assert!(!at(5).is_next_to(&at(7)));
    }

    #[test]
    fn adjacency_requires_the_same_file() {
        let mut left = Position::new(5);
        left.set_file("a.weft");
        let mut right = Position::new(6);
        right.set_file("b.weft");
        assert!(!left.is_next_to(&right));
    }

    #[test]
    fn unknown_positions_are_never_adjacent() {
        assert!(!Position::unknown().is_next_to(&Position::new(1)));
        assert!(!Position::new(1).is_next_to(&Position::unknown()));
        assert!(!Position::unknown().is_next_to(&Position::unknown()));
    }

    #[test]
    fn display_uses_the_compact_form() {
        let mut pos = Position::new(3);
        pos.set_file("vars.weft");
        assert_eq!(pos.to_string(), "vars.weft:3");
        assert_eq!(Position::unknown().to_string(), "?");
    }
}
