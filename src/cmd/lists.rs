use crate::generator::roster;
use crate::writer::ScriptWriter;
use std::io;

pub fn run(seed: u64) -> anyhow::Result<()> {
    let mut writer = ScriptWriter::new(Box::new(io::stdout().lock()));
    roster::run(seed, &mut writer)?;
    writer.finish()?;
    Ok(())
}
