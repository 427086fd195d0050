use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ledger-chain")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "createblockchain",
        about = "Create a new chain with a genesis block"
    )]
    Createblockchain,
    #[command(
        name = "addtransaction",
        about = "Queue a transaction in the pending pool"
    )]
    AddTransaction {
        #[arg(help = "Sender name")]
        sender: String,
        #[arg(help = "Receiver name")]
        receiver: String,
        #[arg(help = "Amount (opaque text, never interpreted numerically)")]
        amount: String,
    },
    #[command(
        name = "mine",
        about = "Mine the pending pool into a new block and append it"
    )]
    Mine,
    #[command(name = "printchain", about = "Print all blocks in the chain")]
    Printchain,
    #[command(name = "validate", about = "Verify chain integrity")]
    Validate,
}
