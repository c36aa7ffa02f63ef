use acpc_player::protocol::Args;
use clap::Parser;

fn main() {
    let args = Args::parse();
    if let Err(e) = acpc_player::log(args.logs.as_deref()).and_then(|_| acpc_player::protocol::run(&args)) {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}
