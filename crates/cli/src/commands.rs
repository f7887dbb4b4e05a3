use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use stockkeep_core::{ItemName, Quantity};
use stockkeep_infra::{InventoryConfig, JsonFileStore};
use stockkeep_inventory::InventoryStore;

use crate::cli::{AddArgs, Cli, Command, GetArgs, InitArgs, RemoveArgs};

pub fn run_command(cli: Cli) -> Result<()> {
    let mut config = InventoryConfig::from_env().context("invalid configuration")?;
    if let Some(path) = cli.file {
        config = config.with_data_path(path);
    }
    if let Some(threshold) = cli.threshold {
        config = config.with_low_stock_threshold(threshold);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &config, &mut out)
}

pub fn execute(command: Command, config: &InventoryConfig, out: &mut impl Write) -> Result<()> {
    let mut file = config.file_store();

    match command {
        Command::Init(args) => cmd_init(args, &mut file, out),
        Command::Add(args) => cmd_add(args, &mut file, out),
        Command::Remove(args) => cmd_remove(args, &mut file, out),
        Command::Get(args) => cmd_get(args, &file, out),
        Command::Low => cmd_low(config.low_stock_threshold, &file, out),
        Command::Report => {
            let store = load(&file)?;
            write!(out, "{}", store.report())?;
            Ok(())
        }
    }
}

fn load(file: &JsonFileStore) -> Result<InventoryStore> {
    let mut store = InventoryStore::new();
    store.load(file)?;
    Ok(store)
}

fn cmd_init(args: InitArgs, file: &mut JsonFileStore, out: &mut impl Write) -> Result<()> {
    if file.path().exists() && !args.force {
        bail!(
            "{} already exists; pass --force to replace it",
            file.path().display()
        );
    }
    InventoryStore::new().save(file)?;
    writeln!(out, "initialized empty inventory at {}", file.path().display())?;
    Ok(())
}

fn cmd_add(args: AddArgs, file: &mut JsonFileStore, out: &mut impl Write) -> Result<()> {
    let item = ItemName::new(args.item)?;
    let qty: Quantity = args.qty.parse()?;

    let mut store = if args.create && !file.path().exists() {
        tracing::info!(path = %file.path().display(), "starting with an empty inventory");
        InventoryStore::new()
    } else {
        load(file)?
    };

    let total = store.add(item.clone(), qty)?;
    store
        .save(file)
        .with_context(|| format!("{item} was not saved"))?;
    writeln!(out, "{item}: {total}")?;
    Ok(())
}

fn cmd_remove(args: RemoveArgs, file: &mut JsonFileStore, out: &mut impl Write) -> Result<()> {
    let item = ItemName::new(args.item)?;
    let qty: Quantity = args.qty.parse()?;

    let mut store = load(file)?;
    let remaining = store.remove(&item, qty)?;
    store
        .save(file)
        .with_context(|| format!("removal of {item} was not saved"))?;
    writeln!(out, "{item}: {remaining}")?;
    Ok(())
}

fn cmd_get(args: GetArgs, file: &JsonFileStore, out: &mut impl Write) -> Result<()> {
    let store = load(file)?;
    writeln!(out, "{}: {}", args.item, store.get_quantity(&args.item))?;
    Ok(())
}

fn cmd_low(threshold: u64, file: &JsonFileStore, out: &mut impl Write) -> Result<()> {
    let store = load(file)?;
    let low = store.low_stock(threshold);
    if low.is_empty() {
        writeln!(out, "no items below {threshold}")?;
    } else {
        for item in low {
            writeln!(out, "{item}: {}", store.get_quantity(item.as_str()))?;
        }
    }
    Ok(())
}
