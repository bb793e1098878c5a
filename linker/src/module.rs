use arch::{Mode, Word};
use std::fmt;
use tracing::trace;

use crate::error::{Loc, Section, SyntaxError};
use crate::token::Tokens;

// ----------------------------------------------------------------------------
// Raw module

/// One module as it appears in the token stream: three sections, each
/// still prefixed by its count token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModule {
    number: usize,
    defs: Vec<String>,
    uses: Vec<String>,
    code: Vec<String>,
}

impl RawModule {
    /// Consume the def list, use list and code of module `number`.
    pub fn parse(tokens: &mut Tokens, number: usize) -> Result<Self, SyntaxError> {
        let defs = section(tokens, Loc::new(number, Section::Def), 2)?;
        let uses = section(tokens, Loc::new(number, Section::Use), 1)?;
        let code = section(tokens, Loc::new(number, Section::Code), 2)?;
        Ok(RawModule {
            number,
            defs,
            uses,
            code,
        })
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn defs(&self) -> &[String] {
        &self.defs
    }

    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    pub fn code(&self) -> &[String] {
        &self.code
    }
}

/// Read a count token and take the `count * width + 1` tokens of the section.
fn section(tokens: &mut Tokens, loc: Loc, width: usize) -> Result<Vec<String>, SyntaxError> {
    let head = tokens
        .peek()
        .ok_or(SyntaxError::Truncated { loc, missing: 1 })?;
    let count: usize = head.parse().map_err(|_| SyntaxError::InvalidCount {
        found: head.to_string(),
        loc,
    })?;
    let span = count.saturating_mul(width).saturating_add(1);
    let tokens = tokens
        .take_span(span)
        .map_err(|missing| SyntaxError::Truncated { loc, missing })?;
    Ok(tokens.iter().map(|t| t.to_string()).collect())
}

/// Split the whole input into raw modules. The stream must end exactly
/// after a code section.
pub fn split(text: &str) -> Result<Vec<RawModule>, SyntaxError> {
    let mut tokens = Tokens::new(text);
    let mut raws = vec![];
    while !tokens.at_end() {
        let raw = RawModule::parse(&mut tokens, raws.len() + 1)?;
        trace!("split module {} at token {}", raw.number(), tokens.position());
        raws.push(raw);
    }
    Ok(raws)
}

// ----------------------------------------------------------------------------
// Typed module

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Def {
    pub symbol: String,
    pub value: usize,
}

impl Def {
    pub fn new(symbol: &str, value: usize) -> Self {
        Def {
            symbol: symbol.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeWord {
    pub mode: Mode,
    pub addr: Word,
}

impl CodeWord {
    pub fn new(mode: Mode, addr: Word) -> Self {
        CodeWord { mode, addr }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    number: usize,
    base: usize,
    defs: Vec<Def>,
    uses: Vec<String>,
    code: Vec<CodeWord>,
}

impl Module {
    pub fn new(
        number: usize,
        base: usize,
        defs: Vec<Def>,
        uses: Vec<String>,
        code: Vec<CodeWord>,
    ) -> Self {
        Module {
            number,
            base,
            defs,
            uses,
            code,
        }
    }

    /// Type the sections of a raw module placed at `base`.
    pub fn from_raw(raw: &RawModule, base: usize) -> Result<Self, SyntaxError> {
        let number = raw.number();

        let def_loc = Loc::new(number, Section::Def);
        let defs = raw.defs()[1..]
            .chunks_exact(2)
            .map(|pair| -> Result<Def, SyntaxError> {
                let value = pair[1].parse().map_err(|_| SyntaxError::InvalidValue {
                    symbol: pair[0].clone(),
                    value: pair[1].clone(),
                    loc: def_loc,
                })?;
                Ok(Def::new(&pair[0], value))
            })
            .collect::<Result<Vec<_>, SyntaxError>>()?;

        let uses = raw.uses()[1..].to_vec();

        let code_loc = Loc::new(number, Section::Code);
        let code = raw.code()[1..]
            .chunks_exact(2)
            .map(|pair| -> Result<CodeWord, SyntaxError> {
                let mode = Mode::parse(&pair[0]).map_err(|_| SyntaxError::InvalidMode {
                    mode: pair[0].clone(),
                    loc: code_loc,
                })?;
                let addr = Word::parse(&pair[1])
                    .map_err(|e| SyntaxError::from_word(e, mode, &pair[1], code_loc))?;
                Ok(CodeWord::new(mode, addr))
            })
            .collect::<Result<Vec<_>, SyntaxError>>()?;

        Ok(Module::new(number, base, defs, uses, code))
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn base_address(&self) -> usize {
        self.base
    }

    pub fn next_address(&self) -> usize {
        self.base + self.size()
    }

    pub fn size(&self) -> usize {
        self.code.len()
    }

    pub fn defs(&self) -> &[Def] {
        &self.defs
    }

    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    pub fn code(&self) -> &[CodeWord] {
        &self.code
    }

    /// Code words of one addressing mode.
    pub fn words(&self, mode: Mode) -> impl Iterator<Item = &Word> + '_ {
        self.code
            .iter()
            .filter(move |cw| cw.mode == mode)
            .map(|cw| &cw.addr)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Module {}", self.number)?;
        writeln!(f, "Base Address: {}", self.base)?;
        write_defs(f, &self.defs)?;
        write_uses(f, &self.uses)?;
        write_code(f, &self.code)
    }
}

pub(crate) fn write_defs(f: &mut fmt::Formatter<'_>, defs: &[Def]) -> fmt::Result {
    write!(f, "{}", defs.len())?;
    for def in defs {
        write!(f, " {} {}", def.symbol, def.value)?;
    }
    writeln!(f)
}

pub(crate) fn write_uses(f: &mut fmt::Formatter<'_>, uses: &[String]) -> fmt::Result {
    write!(f, "{}", uses.len())?;
    for name in uses {
        write!(f, " {}", name)?;
    }
    writeln!(f)
}

pub(crate) fn write_code(f: &mut fmt::Formatter<'_>, code: &[CodeWord]) -> fmt::Result {
    write!(f, "{}", code.len())?;
    for cw in code {
        write!(f, " {} {}", cw.mode, cw.addr)?;
    }
    writeln!(f)
}

/// Parse the whole input into modules with their base addresses assigned.
pub fn parse(text: &str) -> Result<Vec<Module>, SyntaxError> {
    let raws = split(text)?;
    let mut modules = Vec::with_capacity(raws.len());
    let mut base = 0;
    for raw in &raws {
        let module = Module::from_raw(raw, base)?;
        base = module.next_address();
        modules.push(module);
    }
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MODULES: &str = "1 A 0 0 1 I 1000\n0 1 A 1 E 1000\n";

    #[test]
    fn split_consumes_all_tokens() {
        let raws = split(TWO_MODULES).unwrap();
        assert_eq!(raws.len(), 2);
        assert_eq!(raws[0].defs(), &["1", "A", "0"]);
        assert_eq!(raws[0].uses(), &["0"]);
        assert_eq!(raws[0].code(), &["1", "I", "1000"]);
        assert_eq!(raws[1].defs(), &["0"]);
        assert_eq!(raws[1].uses(), &["1", "A"]);
        assert_eq!(raws[1].code(), &["1", "E", "1000"]);
    }

    #[test]
    fn base_addresses_accumulate() {
        let err = parse("0 0 2 I 1000 I 1000  0 0 3 I 1 I 2 I 3 0 0 1 A 1000").unwrap_err();
        // `I 1` is not a 4-digit word
        assert!(matches!(err, SyntaxError::AddressWidth { .. }));

        let modules =
            parse("0 0 2 I 1000 I 1000  0 0 3 I 1001 I 1002 I 1003  0 0 1 A 1000").unwrap();
        let bases: Vec<_> = modules.iter().map(Module::base_address).collect();
        assert_eq!(bases, vec![0, 2, 5]);
        assert_eq!(modules[2].next_address(), 6);
    }

    #[test]
    fn typed_sections() {
        let modules = parse(TWO_MODULES).unwrap();
        assert_eq!(modules[0].defs(), &[Def::new("A", 0)]);
        assert!(modules[0].uses().is_empty());
        assert_eq!(modules[1].uses(), &["A".to_string()]);
        assert_eq!(modules[1].code()[0].mode, Mode::E);
        assert_eq!(modules[1].code()[0].addr.to_string(), "1000");
    }

    #[test]
    fn duplicate_defs_are_preserved() {
        let modules = parse("2 X 0 X 1 0 2 I 1000 I 1000").unwrap();
        assert_eq!(modules[0].defs().len(), 2);
    }

    #[test]
    fn empty_input_has_no_modules() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse(" \n\t ").unwrap().is_empty());
    }

    #[test]
    fn invalid_count() {
        let err = parse("x A 0 0 0").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::InvalidCount {
                found: "x".to_string(),
                loc: Loc::new(1, Section::Def),
            }
        );
        let err = parse("0 -1 0").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidCount { loc, .. } if loc.section == Section::Use));
    }

    #[test]
    fn truncated_section() {
        let err = parse("0 0 3 I 1000 I 1000").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Truncated {
                loc: Loc::new(1, Section::Code),
                missing: 2,
            }
        );
    }

    #[test]
    fn truncated_module() {
        let err = parse("0 0 1 I 1000 1 X 0").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Truncated {
                loc: Loc::new(2, Section::Use),
                missing: 1,
            }
        );
    }

    #[test]
    fn invalid_value() {
        let err = parse("1 X five 0 1 I 1000").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidValue { ref symbol, .. } if symbol == "X"));
    }

    #[test]
    fn invalid_mode() {
        let err = parse("0 0 1 Q 1000").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidMode { ref mode, .. } if mode == "Q"));
    }

    #[test]
    fn non_numeric_address() {
        let err = parse("0 0 1 A 10x0").unwrap_err();
        assert!(matches!(err, SyntaxError::NonNumericAddress { mode: Mode::A, .. }));
    }

    #[test]
    fn words_filters_by_mode() {
        let modules = parse("0 0 3 R 1001 I 2000 R 1002").unwrap();
        let fields: Vec<_> = modules[0].words(Mode::R).map(Word::field).collect();
        assert_eq!(fields, vec![1, 2]);
    }

    #[test]
    fn display_lists_sections() {
        let modules = parse(TWO_MODULES).unwrap();
        assert_eq!(
            modules[1].to_string(),
            "Module 2\nBase Address: 1\n0\n1 A\n1 E 1000\n"
        );
    }
}
