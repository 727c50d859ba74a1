use std::env;
use std::path::Path;
use std::process;

use anyhow::Result;
use hashbench::input::InputFile;
use hashbench::pipeline;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        usage(&args[0]);
    }

    let nb_workers = match args[2].parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => usage(&args[0]),
    };

    if let Err(e) = run(Path::new(&args[1]), nb_workers) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

fn run(path: &Path, nb_workers: usize) -> Result<()> {
    let input = InputFile::open(path)?;
    let report = pipeline::execute(input.bytes(), nb_workers)?;

    println!("threads = {}", report.nb_workers);
    println!("blocks per thread = {}", report.blocks_per_worker);
    println!("hash value = {}", report.combined_hash);
    println!("time taken = {:.6}", report.duration.as_secs_f64());
    println!("------------------------------------------------");

    Ok(())
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} filename num_threads", program);
    process::exit(1);
}
