// src/main.rs
use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use healthy_breads::application::usecase::{
    AdminManager, AdminUseCase, CheckoutManager, CheckoutUseCase, InventoryManager,
    InventoryUseCase,
};
use healthy_breads::cli::{self, AdminCommand, Cli, Command, OrderArgs};
use healthy_breads::config::Config;
use healthy_breads::domain::catalog;
use healthy_breads::domain::checkout::CheckoutSession;
use healthy_breads::domain::errors::{AppError, AppResult, CheckoutError};
use healthy_breads::domain::models::{Order, Product};
use healthy_breads::domain::repository::{
    AdminSessionRepository, CatalogRepository, OrderRepository,
};
use healthy_breads::infrastructure::notifier::notifier_from_config;
use healthy_breads::infrastructure::storage::{
    FileAdminSessionRepository, FileCatalogRepository, FileOrderRepository, JsonFileStore,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting healthy_breads v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using data directory {}", config.store.data_dir.display());

    // Wire the store, repositories and use cases
    let store = JsonFileStore::new(&config.store.data_dir);
    let catalog_repository: Arc<Mutex<dyn CatalogRepository + Send + Sync>> =
        Arc::new(Mutex::new(FileCatalogRepository::new(
            store.clone(),
            config.catalog.environment,
        )));
    let order_repository: Arc<Mutex<dyn OrderRepository + Send + Sync>> =
        Arc::new(Mutex::new(FileOrderRepository::new(store.clone())));
    let admin_repository: Arc<Mutex<dyn AdminSessionRepository + Send + Sync>> =
        Arc::new(Mutex::new(FileAdminSessionRepository::new(store)));

    let inventory = InventoryManager::new(Arc::clone(&catalog_repository));
    let admin = AdminManager::new(admin_repository, Arc::clone(&order_repository));
    let checkout = CheckoutManager::new(
        Arc::clone(&catalog_repository),
        order_repository,
        notifier_from_config(&config.notifier),
    );

    match cli.command {
        Command::Catalog => {
            for product in checkout.current_catalog().await? {
                print_product(&product);
            }
        }
        Command::Order(args) => place_order(&checkout, args).await?,
        Command::Admin { command } => run_admin(&admin, &inventory, command).await?,
    }

    // Let detached notification deliveries settle before the process exits
    checkout.drain_notifications().await;

    Ok(())
}

/// Drive the checkout state machine end to end with the order arguments.
async fn place_order(checkout: &CheckoutManager, args: OrderArgs) -> AppResult<()> {
    let mut session = CheckoutSession::new();

    for raw in &args.items {
        let (product_id, quantity) = cli::parse_item(raw).map_err(AppError::from)?;
        session.select(&product_id);
        session.set_quantity(&product_id, quantity);
    }

    if !session.continue_to_details() {
        return Err(AppError::Checkout(CheckoutError::EmptySelection));
    }

    session.set_customer_name(&args.name);
    session.set_customer_phone(&args.phone);
    session.set_customer_address(&args.address);

    let order = checkout.submit(&mut session).await?;

    println!("Pedido #{} registrado", order.id);
    for item in &order.items {
        println!("  {} x{} - ${:.2}", item.name, item.quantity, item.subtotal());
    }
    println!("Total: ${:.2}", order.total_amount);
    Ok(())
}

async fn run_admin(
    admin: &AdminManager,
    inventory: &InventoryManager,
    command: AdminCommand,
) -> AppResult<()> {
    match command {
        AdminCommand::Login => {
            admin.login().await?;
            println!("Sesión de administrador iniciada");
        }
        AdminCommand::Logout => {
            admin.logout().await?;
            println!("Sesión de administrador cerrada");
        }
        AdminCommand::Inventory => {
            admin.require_authenticated().await?;
            for product in inventory.list_products().await? {
                print_product(&product);
            }
        }
        AdminCommand::SetStock { product_id, stock } => {
            admin.require_authenticated().await?;
            let snapshot = inventory.set_stock(&product_id, stock).await?;
            match catalog::find(&snapshot, &product_id) {
                Some(product) => {
                    println!("{}: existencias ahora {}", product.name, product.stock)
                }
                None => println!("El producto '{}' no está en el catálogo", product_id),
            }
        }
        AdminCommand::Orders => {
            admin.require_authenticated().await?;
            let orders = admin.list_orders().await?;
            if orders.is_empty() {
                println!("No hay pedidos aún");
            }
            for order in orders {
                print_order(&order);
            }
        }
        AdminCommand::Export { output } => {
            admin.require_authenticated().await?;
            let contents = inventory.export_inventory().await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &contents)?;
                    println!("Inventario exportado a {}", path.display());
                }
                None => println!("{}", contents),
            }
        }
    }
    Ok(())
}

fn print_product(product: &Product) {
    println!(
        "{:<12} {:<20} ${:.2}  ({} disponibles)",
        product.id, product.name, product.price, product.stock
    );
}

fn print_order(order: &Order) {
    println!(
        "Pedido #{} - {}",
        order.id,
        order.date.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  {} | {} | {}",
        order.customer_details.name, order.customer_details.phone, order.customer_details.address
    );
    for item in &order.items {
        println!("  {} x{} - ${:.2}", item.name, item.quantity, item.subtotal());
    }
    println!("  Total: ${:.2}", order.total_amount);
}
