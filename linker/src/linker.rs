//! Two-pass relocating linker (§4.4).
//!
//! Pass 1 tokenises every module's `{deflist, uselist, program text}` and
//! builds the global symbol table, reporting multiply-defined symbols and
//! oversized relative addresses. Pass 2 re-tokenises the same input from
//! scratch and resolves every instruction operand, producing the absolute
//! memory map plus inline error/warning annotations. Both passes share
//! nothing but the finished symbol table between them, mirroring the
//! original two-pass-over-the-file design.
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::tokenizer::{ParseError, ParseErrorKind, Tokenizer};

const MACHINE_SIZE: i32 = 512;
const LIST_SIZE: i32 = 16;

pub struct Linker {
    input: String,
}

impl Linker {
    pub fn new(input: String) -> Self {
        Self { input }
    }

    /// Run both passes, writing the Symbol Table, Memory Map, and warnings
    /// to `out` in the exact order and shape the original program emits
    /// them. Returns `Ok(())` even when pass 1 reports a fatal parse error
    /// (matching the original: a parse error is printed and pass 2 is
    /// simply skipped, not treated as a process-level failure).
    pub fn run(&self, out: &mut dyn std::fmt::Write) -> std::fmt::Result {
        match self.pass1(out)? {
            Some(symbol_table) => self.pass2(&symbol_table, out),
            None => Ok(()),
        }
    }

    fn pass1(
        &self,
        out: &mut dyn std::fmt::Write,
    ) -> Result<Option<HashMap<String, i32>>, std::fmt::Error> {
        let mut tok = Tokenizer::new(&self.input);
        let mut deflist: Vec<String> = Vec::new();
        let mut defaddr: Vec<i32> = Vec::new();
        let mut multiply_defined: HashMap<String, bool> = HashMap::new();
        let mut symbol_table: HashMap<String, i32> = HashMap::new();

        let mut module = 1;
        let mut module_addr: i32 = 0;
        let mut p: usize = 0;

        let result: Result<(), ParseError> = (|| {
            while !tok.eof() {
                let defcount = tok.read_int()?;
                if defcount > LIST_SIZE {
                    return Err(tok.error_here(ParseErrorKind::TooManyDefInModule));
                }
                for _ in 0..defcount {
                    let symbol = tok.read_symbol()?;
                    let rel_addr = tok.read_int()?;
                    deflist.push(symbol);
                    defaddr.push(rel_addr);
                }

                let usecount = tok.read_int()?;
                if usecount > LIST_SIZE {
                    return Err(tok.error_here(ParseErrorKind::TooManyUseInModule));
                }
                for _ in 0..usecount {
                    tok.read_symbol()?;
                }

                let codecount = tok.read_int()?;
                if module_addr + codecount > MACHINE_SIZE {
                    return Err(tok.error_here(ParseErrorKind::TooManyInstr));
                }
                for _ in 0..codecount {
                    tok.read_iaer()?;
                    tok.read_int()?;
                }

                while p < deflist.len() {
                    let symbol = deflist[p].clone();
                    if let std::collections::hash_map::Entry::Vacant(e) =
                        symbol_table.entry(symbol.clone())
                    {
                        e.insert(defaddr[p] + module_addr);
                        multiply_defined.insert(symbol.clone(), false);
                    } else {
                        multiply_defined.insert(symbol.clone(), true);
                        deflist.remove(p);
                        defaddr.remove(p);
                        p = p.wrapping_sub(1);
                    }

                    let rel_addr = symbol_table[&symbol] - module_addr;
                    if rel_addr >= codecount {
                        writeln!(
                            out,
                            "Warning: Module {}: {} too big {} (max={}) assume zero relative",
                            module,
                            symbol,
                            rel_addr,
                            codecount - 1
                        )?;
                        symbol_table.insert(symbol, module_addr);
                    }

                    p = p.wrapping_add(1);
                }

                module += 1;
                module_addr += codecount;
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                print_symbol_table(out, &deflist, &multiply_defined, &symbol_table)?;
                Ok(Some(symbol_table))
            }
            Err(e) => {
                writeln!(out, "{}", e.format())?;
                Ok(None)
            }
        }
    }

    fn pass2(
        &self,
        symbol_table: &HashMap<String, i32>,
        out: &mut dyn std::fmt::Write,
    ) -> std::fmt::Result {
        let mut tok = Tokenizer::new(&self.input);
        let mut deforder: Vec<Vec<String>> = Vec::new();
        let mut definelist_usage: HashMap<String, bool> = HashMap::new();
        let mut unique_defsymbol: HashSet<String> = HashSet::new();
        let mut instrerr: Vec<String> = Vec::new();
        let mut memory_map: Vec<i32> = Vec::new();
        let mut moderr: Vec<(usize, String)> = Vec::new();

        let mut module_addr: i32 = 0;

        // A malformed token stream here would mean pass 1 already failed to
        // reach eof() cleanly, in which case pass 2 never runs (see `run`);
        // unwrap_or is used only to keep this loop infallible, never to mask
        // a real pass-2 parse error (there is none, since the shape was
        // already validated by pass 1).
        while !tok.eof() {
            let defcount = tok.read_int().unwrap_or(0);
            let mut deflist: Vec<String> = Vec::new();
            for _ in 0..defcount {
                let symbol = tok.read_symbol().unwrap_or_default();
                let _ = tok.read_int();
                if !unique_defsymbol.contains(&symbol) {
                    deflist.push(symbol.clone());
                }
                definelist_usage.entry(symbol.clone()).or_insert(false);
                unique_defsymbol.insert(symbol);
            }
            deforder.push(deflist);

            let usecount = tok.read_int().unwrap_or(0);
            let mut uselist: Vec<String> = Vec::new();
            let mut uselist_usage: Vec<bool> = Vec::new();
            for _ in 0..usecount {
                let symbol = tok.read_symbol().unwrap_or_default();
                uselist.push(symbol);
                uselist_usage.push(false);
            }

            let codecount = tok.read_int().unwrap_or(0);
            for _ in 0..codecount {
                let kind = tok.read_iaer().unwrap_or_default();
                let mut err = String::new();
                let instr = tok.read_int().unwrap_or(0);
                let mut opcode = instr / 1000;
                let mut operand = instr % 1000;

                if kind == "I" {
                    if instr >= 10000 {
                        opcode = 9;
                        operand = 999;
                        err.push_str(" Error: Illegal immediate value; treated as 9999");
                    }
                } else if opcode >= 10 {
                    opcode = 9;
                    operand = 999;
                    err.push_str(" Error: Illegal opcode; treated as 9999");
                } else if kind == "R" {
                    if operand >= codecount {
                        operand = 0;
                        write!(
                            err,
                            " Error: Relative address exceeds module size; zero used"
                        )?;
                    }
                    operand += module_addr;
                } else if kind == "E" {
                    if operand as usize >= uselist.len() {
                        write!(
                            err,
                            " Error: External address exceeds length of uselist; treated as immediate"
                        )?;
                    } else {
                        let sym = &uselist[operand as usize];
                        match symbol_table.get(sym) {
                            None => {
                                uselist_usage[operand as usize] = true;
                                write!(err, " Error: {} is not defined; zero used", sym)?;
                                operand = 0;
                            }
                            Some(addr) => {
                                uselist_usage[operand as usize] = true;
                                operand = *addr;
                            }
                        }
                    }
                } else {
                    // type A
                    if operand >= MACHINE_SIZE {
                        operand = 0;
                        write!(
                            err,
                            " Error: Absolute address exceeds machine size; zero used"
                        )?;
                    }
                }

                memory_map.push(opcode * 1000 + operand);
                instrerr.push(err);
            }

            moderr.push((module_addr as usize + codecount as usize, String::new()));
            for (i, sym) in uselist.iter().enumerate() {
                let used = uselist_usage[i];
                let entry = definelist_usage.entry(sym.clone()).or_insert(false);
                *entry |= used;
                if !used {
                    let msg = format!(
                        "Warning: Module {}: {} appeared in the uselist but was not actually used\n",
                        deforder.len(),
                        sym
                    );
                    moderr.last_mut().expect("just pushed").1.push_str(&msg);
                }
            }

            module_addr += codecount;
        }

        print_memory_map(out, &memory_map, &instrerr, &moderr)?;

        for (i, deflist) in deforder.iter().enumerate() {
            for symbol in deflist {
                if !definelist_usage.get(symbol).copied().unwrap_or(false) {
                    writeln!(
                        out,
                        "Warning: Module {}: {} was defined but never used",
                        i + 1,
                        symbol
                    )?;
                }
            }
        }

        Ok(())
    }
}

fn print_symbol_table(
    out: &mut dyn std::fmt::Write,
    deflist: &[String],
    multiply_defined: &HashMap<String, bool>,
    symbol_table: &HashMap<String, i32>,
) -> std::fmt::Result {
    writeln!(out, "Symbol Table")?;
    for symbol in deflist {
        write!(out, "{}={}", symbol, symbol_table[symbol])?;
        if multiply_defined.get(symbol).copied().unwrap_or(false) {
            write!(
                out,
                " Error: This variable is multiple times defined; first value used"
            )?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn print_memory_map(
    out: &mut dyn std::fmt::Write,
    memory_map: &[i32],
    instrerr: &[String],
    moderr: &[(usize, String)],
) -> std::fmt::Result {
    writeln!(out, "Memory Map")?;
    let mut p = 0;
    for (i, word) in memory_map.iter().enumerate() {
        while p < moderr.len() && i == moderr[p].0 {
            write!(out, "{}", moderr[p].1)?;
            p += 1;
        }
        writeln!(out, "{:03}: {:04}{}", i, word, instrerr[i])?;
    }
    while p < moderr.len() {
        write!(out, "{}", moderr[p].1)?;
        p += 1;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let linker = Linker::new(input.to_string());
        let mut out = String::new();
        linker.run(&mut out).unwrap();
        out
    }

    #[test]
    fn single_module_no_symbols() {
        let out = run("0 0 2\nA 1\nA 2\n");
        assert!(out.starts_with("Symbol Table\n\nMemory Map\n"));
        assert!(out.contains("000: 0001\n"));
        assert!(out.contains("001: 0002\n"));
    }

    #[test]
    fn multiply_defined_symbol_keeps_first_value() {
        // module 1 defines `x` at 0, module 2 also defines `x` at 0
        let input = "1 x 0 0 1\nI 1000\n1 x 0 0 1\nI 2000\n";
        let out = run(input);
        assert!(out.contains("x=0 Error: This variable is multiple times defined; first value used"));
    }

    #[test]
    fn external_reference_resolves_to_absolute_address() {
        // module 1 defines `x` at rel 0; module 2 uses `x` via E
        let input = "1 x 0 0 2\nA 0\nA 0\n0 1 x 1\nE 0\n";
        let out = run(input);
        assert!(out.contains("002: 0000"));
        assert!(!out.contains("is not defined"));
    }

    #[test]
    fn undefined_external_reports_zero_and_warns() {
        let input = "0 1 y 1\nE 0\n";
        let out = run(input);
        assert!(out.contains("000: 0000 Error: y is not defined; zero used"));
    }

    #[test]
    fn parse_error_is_fatal_and_reported() {
        let out = run("abc\n");
        assert!(out.contains("Parse Error line 1 offset 1: NUM_EXPECTED"));
        assert!(!out.contains("Symbol Table"));
    }
}
