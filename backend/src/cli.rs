use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "beach volleyball tournaments backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Fetch the tournament list from VIS and print it as JSON
    Fetch {
        /// Only tournaments of this year
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Fetch one tournament's detail from VIS and print it as JSON
    Detail {
        /// VIS tournament number
        number: u32,
    },
}
