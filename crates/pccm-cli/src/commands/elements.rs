use crate::cli::ElementsArgs;
use crate::error::{CliError, Result};
use pccm::core::elements::ElementTable;
use tracing::info;

pub fn run(args: ElementsArgs) -> Result<()> {
    let table = match &args.table {
        Some(path) => {
            info!("Merging element table from {:?}", path);
            ElementTable::load(path).map_err(|e| CliError::parsing(path, e))?
        }
        None => ElementTable::default(),
    };
    print!("{}", render_table(&table));
    Ok(())
}

fn render_table(table: &ElementTable) -> String {
    let header = format!(
        "{:<8} {:>8} {:>16} {:>16}\n",
        "Element", "Z", "PBE (Ha)", "CCSD (Ha)"
    );
    table
        .entries()
        .into_iter()
        .map(|(symbol, params)| {
            format!(
                "{:<8} {:>8.1} {:>16.8} {:>16.8}\n",
                symbol, params.nuclear_charge, params.pbe_energy, params.ccsd_energy
            )
        })
        .fold(header, |mut out, row| {
            out.push_str(&row);
            out
        })
}
