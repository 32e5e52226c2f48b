use std::path::Path;

use snipgen_compiler::{builtin_cases, find_case, Compiler, FixtureCase, Oracle};
use snipgen_core::EngineConfig;

pub fn run(dir: &Path, check: bool, names: &[String], config: EngineConfig) -> anyhow::Result<()> {
    let cases = if names.is_empty() {
        builtin_cases()
    } else {
        names
            .iter()
            .map(|name| find_case(name))
            .collect::<Result<Vec<FixtureCase>, _>>()?
    };

    let compiler = Compiler::new(config);
    let oracle = Oracle::new(&compiler, dir);

    if check {
        let report = oracle.check(&cases)?;
        for discrepancy in &report.discrepancies {
            println!("{discrepancy}");
        }
        if !report.is_clean() {
            anyhow::bail!(
                "{} of {} fixtures out of date; rerun without --check to regenerate",
                report.discrepancies.len(),
                report.checked
            );
        }
        println!("{} fixtures up to date.", report.checked);
    } else {
        let written = oracle.write(&cases)?;
        println!("Wrote {written} fixtures to {}.", dir.display());
    }
    Ok(())
}
