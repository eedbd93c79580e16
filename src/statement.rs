/// A source line split into its mnemonic and operand tokens.
///
/// Normalization is shared by the pseudo expander and the encoder: the text is
/// uppercased, commas count as whitespace, and runs of whitespace separate tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

impl Statement {
    /// Returns `None` for a line with no tokens.
    pub fn parse(line: &str) -> Option<Self> {
        let upper = line.to_ascii_uppercase().replace(',', " ");
        let mut tokens = upper.split_whitespace().map(str::to_string);
        let mnemonic = tokens.next()?;
        Some(Self {
            mnemonic,
            operands: tokens.collect(),
        })
    }

    pub fn operand(&self, idx: usize) -> Option<&str> {
        self.operands.get(idx).map(String::as_str)
    }

    pub fn arity(&self) -> usize {
        self.operands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_and_spaces_both_separate() {
        let st = Statement::parse("  add r1,r2 ,  r3\t").unwrap();
        assert_eq!(st.mnemonic, "ADD");
        assert_eq!(st.operands, vec!["R1", "R2", "R3"]);
        assert_eq!(st.arity(), 3);
    }

    #[test]
    fn blank_line_has_no_statement() {
        assert!(Statement::parse("").is_none());
        assert!(Statement::parse(" ,, \t").is_none());
    }
}
