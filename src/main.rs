use std::process::ExitCode;

use cart_service::config::Config;
use cart_service::handlers::cart as handlers;
use cart_service::infrastructure::notifier::LogNotifier;
use cart_service::{build_store, Cart, ProductId};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "cart", about = "Stock-checked shopping cart")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the saved cart
    List,
    /// Add one unit of a product
    Add { product_id: u64 },
    /// Remove a product line
    Remove { product_id: u64 },
    /// Set the quantity of a product already in the cart
    Update {
        product_id: u64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(&cli.config.log_level));

    let mut store = match build_store(
        &cli.config.api_url,
        &cli.config.storage_dir,
        cli.config.http_timeout(),
    ) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Could not start: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!(
        "Catalog at {}, cart stored in {}",
        cli.config.api_url,
        cli.config.storage_dir.display()
    );

    let notifier = LogNotifier;
    let outcome = match cli.command {
        Command::List => Ok(()),
        Command::Add { product_id } => {
            handlers::add_product(&mut store, &notifier, ProductId(product_id)).await
        }
        Command::Remove { product_id } => {
            handlers::remove_product(&mut store, &notifier, ProductId(product_id))
        }
        Command::Update { product_id, amount } => {
            handlers::update_product_amount(&mut store, &notifier, ProductId(product_id), amount)
                .await
        }
    };

    print_cart(store.cart());

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for entry in cart {
        let title = entry
            .product
            .details
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("-");
        println!("{:>6}  x{:<4} {}", entry.product_id(), entry.quantity(), title);
    }
    println!("{} items", cart.total_quantity());
}
