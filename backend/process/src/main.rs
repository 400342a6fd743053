use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Catalog snapshot to clean
    input: PathBuf,

    /// Where to write the result, defaults to the input file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let output = args.output.unwrap_or_else(|| args.input.clone());

    let report = process::process_catalog(&args.input, &output).await?;

    println!("Products: {}", report.products);
    println!("Changed: {}", report.changed);
    println!("Dropped Prices: {}\n", report.dropped_prices);

    println!("Categories: {}", report.facets.categories.join(", "));
    println!("Perfume Types: {}", report.facets.perfume_types.join(", "));
    println!("Max Price: {}", report.facets.max_price);

    Ok(())
}
