//! Code model for the intercepted command stream
//!
//! A [`Code`] is one command as handed over by the firmware's command
//! interpreter: a G/M/T code with letter parameters, or a comment line.
//! The filter only needs to tell control M-codes and comments apart from
//! everything else, so parameters are kept loosely typed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of an intercepted code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeType {
    /// Motion and machine-state codes (G0, G1, G28, ...)
    #[serde(rename = "G")]
    GCode,
    /// Miscellaneous codes (M106, M50, ...)
    #[serde(rename = "M")]
    MCode,
    /// Tool selection
    #[serde(rename = "T")]
    TCode,
    /// Comment-only line
    #[serde(rename = "C")]
    Comment,
    /// Meta keyword (if, while, echo, ...)
    #[serde(rename = "K")]
    Keyword,
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GCode => write!(f, "G"),
            Self::MCode => write!(f, "M"),
            Self::TCode => write!(f, "T"),
            Self::Comment => write!(f, "C"),
            Self::Keyword => write!(f, "K"),
        }
    }
}

/// Value of a code parameter
///
/// Numbers are tried before text so `S1` and `S"1"` both read as 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Non-negative integer
    Unsigned(u64),
    /// Negative integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Quoted string or expression
    Text(String),
}

impl ParameterValue {
    /// Render the value as text
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    /// Convert the value to an unsigned integer if it represents one
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Unsigned(v) => Some(*v),
            Self::Integer(v) => u64::try_from(*v).ok(),
            Self::Float(v) => {
                if *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64 {
                    Some(*v as u64)
                } else {
                    None
                }
            }
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ParameterValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single letter parameter of a code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeParameter {
    /// Parameter letter (P, S, X, ...)
    pub letter: char,
    /// Parameter value
    pub value: ParameterValue,
}

impl CodeParameter {
    /// Create a new parameter
    pub fn new(letter: char, value: impl Into<ParameterValue>) -> Self {
        Self {
            letter,
            value: value.into(),
        }
    }
}

/// How the filter treats a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind<'a> {
    /// M-code with a major number; may be one of the configured control commands
    ControlCommand(i32),
    /// Non-empty comment text
    Comment(&'a str),
    /// Anything else
    Other,
}

/// An intercepted code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    /// Code type
    #[serde(rename = "type")]
    pub code_type: CodeType,
    /// Major code number (the 50 in M50)
    #[serde(default)]
    pub major_number: Option<i32>,
    /// Minor code number (the 1 in G29.1)
    #[serde(default)]
    pub minor_number: Option<i32>,
    /// Letter parameters in order of appearance
    #[serde(default)]
    pub parameters: Vec<CodeParameter>,
    /// Comment text without the leading `;`
    #[serde(default)]
    pub comment: Option<String>,
}

impl Code {
    /// Create a code of the given type and number
    pub fn new(code_type: CodeType, major_number: Option<i32>) -> Self {
        Self {
            code_type,
            major_number,
            minor_number: None,
            parameters: Vec::new(),
            comment: None,
        }
    }

    /// Create an M-code
    pub fn mcode(number: i32) -> Self {
        Self::new(CodeType::MCode, Some(number))
    }

    /// Create a G-code
    pub fn gcode(number: i32) -> Self {
        Self::new(CodeType::GCode, Some(number))
    }

    /// Create a comment line
    pub fn comment(text: impl Into<String>) -> Self {
        let mut code = Self::new(CodeType::Comment, None);
        code.comment = Some(text.into());
        code
    }

    /// Append a parameter
    pub fn with_parameter(mut self, letter: char, value: impl Into<ParameterValue>) -> Self {
        self.parameters.push(CodeParameter::new(letter, value));
        self
    }

    /// Look up a parameter by letter (case-insensitive)
    pub fn parameter(&self, letter: char) -> Option<&ParameterValue> {
        self.parameters
            .iter()
            .find(|p| p.letter.eq_ignore_ascii_case(&letter))
            .map(|p| &p.value)
    }

    /// Read a parameter as text, empty when absent
    pub fn string_parameter(&self, letter: char) -> String {
        self.parameter(letter)
            .map(ParameterValue::as_string)
            .unwrap_or_default()
    }

    /// Read a parameter as an unsigned integer
    ///
    /// Falls back to `default` when the parameter is missing or not a
    /// non-negative integer.
    pub fn u64_parameter_or(&self, letter: char, default: u64) -> u64 {
        self.parameter(letter)
            .and_then(ParameterValue::as_u64)
            .unwrap_or(default)
    }

    /// Classify this code for filtering
    pub fn kind(&self) -> CodeKind<'_> {
        match (self.code_type, self.major_number, self.comment.as_deref()) {
            (CodeType::MCode, Some(number), _) => CodeKind::ControlCommand(number),
            (CodeType::Comment, _, Some(text)) if !text.is_empty() => CodeKind::Comment(text),
            _ => CodeKind::Other,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code_type == CodeType::Comment {
            return write!(f, ";{}", self.comment.as_deref().unwrap_or_default());
        }

        write!(f, "{}", self.code_type)?;
        if let Some(major) = self.major_number {
            write!(f, "{}", major)?;
            if let Some(minor) = self.minor_number {
                write!(f, ".{}", minor)?;
            }
        }
        for param in &self.parameters {
            match &param.value {
                ParameterValue::Text(s) => write!(f, " {}\"{}\"", param.letter, s)?,
                value => write!(f, " {}{}", param.letter, value)?,
            }
        }
        if let Some(comment) = &self.comment {
            write!(f, " ;{}", comment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Code::mcode(50).kind(), CodeKind::ControlCommand(50));
        assert_eq!(Code::gcode(1).kind(), CodeKind::Other);
        assert_eq!(
            Code::comment("printing object A").kind(),
            CodeKind::Comment("printing object A")
        );
        assert_eq!(Code::comment("").kind(), CodeKind::Other);
        assert_eq!(Code::new(CodeType::MCode, None).kind(), CodeKind::Other);
        assert_eq!(Code::new(CodeType::TCode, Some(1)).kind(), CodeKind::Other);
    }

    #[test]
    fn test_parameter_lookup_is_case_insensitive() {
        let code = Code::mcode(50).with_parameter('p', "OBJ");
        assert_eq!(code.string_parameter('P'), "OBJ");
        assert_eq!(code.string_parameter('S'), "");
    }

    #[test]
    fn test_u64_parameter_defaults() {
        let code = Code::mcode(52);
        assert_eq!(code.u64_parameter_or('S', 0), 0);

        let code = Code::mcode(52).with_parameter('S', 2u64);
        assert_eq!(code.u64_parameter_or('S', 0), 2);

        let code = Code::mcode(52).with_parameter('S', "two");
        assert_eq!(code.u64_parameter_or('S', 1), 1);

        let code = Code::mcode(52).with_parameter('S', ParameterValue::Integer(-1));
        assert_eq!(code.u64_parameter_or('S', 1), 1);
    }

    #[test]
    fn test_as_u64_conversions() {
        assert_eq!(ParameterValue::Float(1.0).as_u64(), Some(1));
        assert_eq!(ParameterValue::Float(1.5).as_u64(), None);
        assert_eq!(ParameterValue::Text(" 7 ".to_string()).as_u64(), Some(7));
        assert_eq!(ParameterValue::Integer(3).as_u64(), Some(3));
    }

    #[test]
    fn test_numeric_parameter_renders_as_string() {
        let code = Code::mcode(51).with_parameter('P', 12u64);
        assert_eq!(code.string_parameter('P'), "12");
    }

    #[test]
    fn test_deserialize_code() {
        let json = r#"{"type":"M","majorNumber":50,"parameters":[{"letter":"P","value":"EDGE"},{"letter":"S","value":0}]}"#;
        let code: Code = serde_json::from_str(json).unwrap();
        assert_eq!(code.code_type, CodeType::MCode);
        assert_eq!(code.major_number, Some(50));
        assert_eq!(code.parameter('P'), Some(&ParameterValue::Text("EDGE".into())));
        assert_eq!(code.parameter('S'), Some(&ParameterValue::Unsigned(0)));
        assert_eq!(code.comment, None);
    }

    #[test]
    fn test_deserialize_comment() {
        let json = r#"{"type":"C","comment":" printing object Cube"}"#;
        let code: Code = serde_json::from_str(json).unwrap();
        assert_eq!(code.kind(), CodeKind::Comment(" printing object Cube"));
    }

    #[test]
    fn test_display() {
        let code = Code::mcode(50).with_parameter('P', "OBJ").with_parameter('S', 1u64);
        assert_eq!(code.to_string(), "M50 P\"OBJ\" S1");
        assert_eq!(Code::comment("EDGE A").to_string(), ";EDGE A");
    }
}
