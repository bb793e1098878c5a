use color_print::cformat;

use crate::check::Warning;
use crate::link::{Linked, LinkedModule};

/// Symbol table, a blank line, then one `index: address` line per word.
pub fn output(linked: &Linked) -> String {
    let width = linked.symbols().name_width();
    let lines: Vec<String> = linked
        .addresses()
        .enumerate()
        .map(|(idx, addr)| format!("{:<width$} {}", format!("{}:", idx), addr, width = width))
        .collect();
    format!("{}\n\n{}\n", linked.symbols(), lines.join("\n"))
}

/// One `Warning: ...` line per warning, each newline-terminated.
pub fn warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| format!("Warning: {}.\n", w))
        .collect()
}

/// What is written to an output file.
pub fn file_content(linked: &Linked) -> String {
    format!("{}\n\n{}", output(linked), warnings(linked.warnings()))
}

/// Symbol table followed by every linked module with its base address.
pub fn human(linked: &Linked) -> String {
    let modules: Vec<String> = linked.modules().iter().map(|m| m.to_string()).collect();
    format!("Symbol Table\n{}\n{}", linked.symbols(), modules.join("\n"))
}

/// Same layout as [`human`], colored for a terminal.
pub fn human_colored(linked: &Linked) -> String {
    let symbols: Vec<String> = linked
        .symbols()
        .iter()
        .map(|(name, value)| cformat!("<b>{}</>=<y>{}</>", name, value))
        .collect();
    let modules: Vec<String> = linked.modules().iter().map(module_colored).collect();
    format!(
        "{}\n{}\n{}",
        cformat!("<s,u>Symbol Table</>"),
        symbols.join("\n"),
        modules.join("\n")
    )
}

fn module_colored(module: &LinkedModule) -> String {
    let mut defs = module.defs().len().to_string();
    for def in module.defs() {
        defs += &cformat!(" <b>{}</> {}", def.symbol, def.value);
    }
    let mut uses = module.uses().len().to_string();
    for name in module.uses() {
        uses += &cformat!(" <b>{}</>", name);
    }
    let mut code = module.code().len().to_string();
    for cw in module.code() {
        code += &format!(" {} {}", cw.mode.cformat(), cw.addr.cformat());
    }
    format!(
        "{}\n{}\n{}\n{}\n{}\n",
        cformat!("<s>Module {}</>", module.number()),
        cformat!("Base Address: <g>{}</>", module.base_address()),
        defs,
        uses,
        code
    )
}
