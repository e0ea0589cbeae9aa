/// Source context attached to an instruction that may fault at run time.
///
/// Encoded after the `ERROR_DATA` opcode as:
///
/// ```text
/// u8  type length   | type bytes (UTF-8)
/// u32 line
/// u16 column
/// u16 span length
/// u16 lexeme length | lexeme bytes (UTF-8)
/// u16 file length   | file bytes (UTF-8)
/// ```
///
/// Fields are clamped to their encoded width on construction: numbers
/// saturate and strings are cut at the last character boundary that fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorData {
    pub error_type: String,
    pub line: u32,
    pub column: u16,
    pub length: u16,
    pub lexeme: String,
    pub file: String,
}

impl ErrorData {
    pub fn new(
        error_type: &str,
        line: usize,
        column: usize,
        length: usize,
        lexeme: &str,
        file: &str,
    ) -> Self {
        Self {
            error_type: truncate(error_type, u8::MAX as usize).to_string(),
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column: u16::try_from(column).unwrap_or(u16::MAX),
            length: u16::try_from(length).unwrap_or(u16::MAX),
            lexeme: truncate(lexeme, u16::MAX as usize).to_string(),
            file: truncate(file, u16::MAX as usize).to_string(),
        }
    }

    /// Size of the operand in bytes, excluding the opcode.
    pub fn encoded_len(&self) -> usize {
        1 + truncate(&self.error_type, u8::MAX as usize).len()
            + 4
            + 2
            + 2
            + 2
            + truncate(&self.lexeme, u16::MAX as usize).len()
            + 2
            + truncate(&self.file, u16::MAX as usize).len()
    }

    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        // Fields are public and may have been replaced after `new`.
        let error_type = truncate(&self.error_type, u8::MAX as usize);
        let lexeme = truncate(&self.lexeme, u16::MAX as usize);
        let file = truncate(&self.file, u16::MAX as usize);

        out.push(error_type.len() as u8);
        out.extend_from_slice(error_type.as_bytes());
        out.extend_from_slice(&self.line.to_le_bytes());
        out.extend_from_slice(&self.column.to_le_bytes());
        out.extend_from_slice(&self.length.to_le_bytes());
        out.extend_from_slice(&(lexeme.len() as u16).to_le_bytes());
        out.extend_from_slice(lexeme.as_bytes());
        out.extend_from_slice(&(file.len() as u16).to_le_bytes());
        out.extend_from_slice(file.as_bytes());
    }
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a
/// character boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let data = ErrorData::new("ZeroDivisionError", 3, 7, 2, "1 / 0", "a.moa");
        let mut out = Vec::new();
        data.encode_into(&mut out);

        assert_eq!(out.len(), data.encoded_len());
        assert_eq!(out[0], 17);
        assert_eq!(&out[1..18], b"ZeroDivisionError");
        assert_eq!(&out[18..22], &3u32.to_le_bytes());
        assert_eq!(&out[22..24], &7u16.to_le_bytes());
        assert_eq!(&out[24..26], &2u16.to_le_bytes());
        assert_eq!(&out[26..28], &5u16.to_le_bytes());
        assert_eq!(&out[28..33], b"1 / 0");
        assert_eq!(&out[33..35], &5u16.to_le_bytes());
        assert_eq!(&out[35..], b"a.moa");
    }

    #[test]
    fn test_numbers_saturate() {
        let data = ErrorData::new("E", usize::MAX, 70_000, 1 << 20, "", "");
        assert_eq!(data.line, u32::MAX);
        assert_eq!(data.column, u16::MAX);
        assert_eq!(data.length, u16::MAX);
    }

    #[test]
    fn test_strings_truncate_on_char_boundary() {
        let long_type = "é".repeat(200);
        let data = ErrorData::new(&long_type, 1, 0, 1, &"x".repeat(70_000), "f");
        assert_eq!(data.error_type.len(), 254);
        assert_eq!(data.lexeme.len(), u16::MAX as usize);

        let mut out = Vec::new();
        data.encode_into(&mut out);
        assert_eq!(out.len(), data.encoded_len());
    }
}
