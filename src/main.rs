// CLI entry point for the ledger. Each subcommand is a standalone run that
// loads the persisted chain/pool, mutates an in-memory copy, and writes the
// result back.
use clap::Parser;
use ledger_chain::{Command, LedgerStore, Opt};
use log::{error, LevelFilter};
use std::process;

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let store = LedgerStore::from_config();

    match command {
        // Initialize a fresh chain and persist it. Loading with no store
        // file present creates the genesis block.
        Command::Createblockchain => {
            let chain = store.load_chain()?;
            store.save_chain(&chain)?;
            println!("Blockchain created with {} block(s)", chain.len());
        }
        // Queue a transaction in the pending pool for the next mined block
        Command::AddTransaction {
            sender,
            receiver,
            amount,
        } => {
            let transaction = store.submit_transaction(&sender, &receiver, &amount)?;
            println!(
                "Transaction {} queued: {} -> {}, Amount: {}",
                transaction.get_index(),
                transaction.get_sender(),
                transaction.get_receiver(),
                transaction.get_amount()
            );
        }
        // Drain the pool into a mined block and report the result
        Command::Mine => {
            let block = store.mine_next_block()?;
            println!(
                "Block {} mined with nonce {} ({} transactions)",
                block.get_index(),
                block.get_nonce(),
                block.get_transactions().len()
            );
        }
        // Walk the chain from genesis and print every block
        Command::Printchain => {
            let chain = store.load_chain()?;
            for summary in chain.render() {
                println!("Block {}", summary.index);
                println!("Timestamp: {}", summary.timestamp);
                for tx in &summary.transactions {
                    println!(
                        "  Transaction {}: {} -> {}, Amount: {}",
                        tx.get_index(),
                        tx.get_sender(),
                        tx.get_receiver(),
                        tx.get_amount()
                    );
                }
                println!("Previous Hash: {}", summary.prev_hash);
                println!("Current Hash: {}", summary.curr_hash);
                println!();
            }
        }
        // Surface an integrity violation as a failure, with the failing index
        Command::Validate => {
            let chain = store.load_chain()?;
            if let Some(index) = chain.first_invalid() {
                return Err(format!("Blockchain is not valid: block {index} failed").into());
            }
            println!("Blockchain is valid");
        }
    }
    Ok(())
}
