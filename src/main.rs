mod cli;

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use playground::config::Config;
use playground::model::{product, user, Credentials, Entity, FormFields, Product, User};
use playground::session::TokenStore;
use playground::store::{AppState, EntityOperation, EntitySlice, OperationStatus, Store};

use cli::{Cli, Command, ProductsCommand, UsersCommand};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    playground::logging::init_tracing(cli.verbose);

    match run(cli).await {
        Ok(OperationStatus::Succeeded) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<OperationStatus> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }

    let token_path = config.session.resolved_token_path();
    let store = Store::from_config(&config, TokenStore::file(token_path.clone()))
        .context("Failed to create HTTP client")?;
    trace_transitions(&store);

    let status = match cli.command {
        Command::Products { command } => run_products(&store, &config, command).await?,
        Command::Users { command } => run_users(&store, &config, command).await?,
        Command::SignIn { username, password } => {
            let credentials = Credentials::from_form(
                &FormFields::new()
                    .with("username", &username)
                    .with("password", &password),
            )?;
            let status = store.sign_in(&credentials).await;
            if let Some(profile) = &store.state().session.profile {
                println!("{}", describe_user(profile));
            }
            status
        }
        Command::SignOut => store.sign_out().await,
        Command::Whoami => {
            if !store.is_logged() {
                bail!("Not signed in");
            }
            let status = store.load_profile().await;
            if let Some(profile) = &store.state().session.profile {
                println!("{}", describe_user(profile));
            }
            status
        }
        Command::Status => {
            let state = store.state();
            let login = if state.session.is_logged { "signed in" } else { "signed out" };
            println!("session: {}", login);
            println!("api:     {}", config.api.base_url);
            println!("token:   {}", token_path.display());
            println!("config:  {}", cli.config.unwrap_or_else(Config::config_path).display());
            OperationStatus::Succeeded
        }
    };

    for notification in store.drain_notifications() {
        if notification.is_error() {
            eprintln!("! {}", notification.message);
        } else {
            println!("* {}", notification.message);
        }
    }
    Ok(status)
}

async fn run_products(store: &Store, config: &Config, command: ProductsCommand) -> anyhow::Result<OperationStatus> {
    let (operation, status) = match command {
        ProductsCommand::List(args) => {
            let per_page = args.per_page.unwrap_or(config.paging.per_page);
            (EntityOperation::List, store.list_products(args.page, per_page).await)
        }
        ProductsCommand::Get { id } => (EntityOperation::Fetch, store.fetch_product(id).await),
        ProductsCommand::Create(fields) => {
            let product = product::from_form(&fields.form()?)?;
            (EntityOperation::Create, store.create_product(&product).await)
        }
        ProductsCommand::Update { id, fields } => {
            let product = product::from_form(&fields.form()?)?;
            (EntityOperation::Update, store.update_product(id, &product).await)
        }
        ProductsCommand::Delete { id } => (EntityOperation::Delete, store.delete_product(id).await),
        ProductsCommand::Count => (EntityOperation::Count, store.count_products().await),
    };
    report(&store.state().products, operation, describe_product);
    Ok(status)
}

async fn run_users(store: &Store, config: &Config, command: UsersCommand) -> anyhow::Result<OperationStatus> {
    let (operation, status) = match command {
        UsersCommand::List(args) => {
            let per_page = args.per_page.unwrap_or(config.paging.per_page);
            (EntityOperation::List, store.list_users(args.page, per_page).await)
        }
        UsersCommand::Get { id } => (EntityOperation::Fetch, store.fetch_user(id).await),
        UsersCommand::Create(fields) => {
            let user = user::from_form(&fields.form()?)?;
            (EntityOperation::Create, store.create_user(&user).await)
        }
        UsersCommand::Update { id, fields } => {
            let user = user::from_form(&fields.form()?)?;
            (EntityOperation::Update, store.update_user(id, &user).await)
        }
        UsersCommand::Count => (EntityOperation::Count, store.count_users().await),
    };
    report(&store.state().users, operation, describe_user);
    Ok(status)
}

/// Print what the settled operation left in its slice.
fn report<T: Entity>(slice: &EntitySlice<T>, operation: EntityOperation, describe: fn(&T) -> String) {
    if slice.status(operation) != OperationStatus::Succeeded {
        return;
    }
    match operation {
        EntityOperation::Count => {
            if let Some(total) = slice.total {
                println!("{} {}s", total, T::KIND);
            }
        }
        EntityOperation::List => {
            let entities = slice.entities.as_deref().unwrap_or_default();
            for entity in entities {
                println!("{}", describe(entity));
            }
            if let Some(count) = slice.count {
                println!("({} of {})", entities.len(), count);
            }
        }
        EntityOperation::Fetch | EntityOperation::Create | EntityOperation::Update => {
            if let Some(current) = &slice.current {
                println!("{}", describe(current));
            }
        }
        EntityOperation::Delete => {}
    }
}

fn describe_product(product: &Product) -> String {
    format!(
        "#{} {} [{}] ${:.2} ({} in stock)",
        display_id(product.id),
        product.title,
        product.category,
        product.price,
        product.stock
    )
}

fn describe_user(user: &User) -> String {
    format!(
        "#{} {} <{}> {}",
        display_id(user.id),
        user.username,
        user.email,
        user.full_name()
    )
}

fn display_id(id: Option<u64>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Log every published state change at debug level.
fn trace_transitions(store: &Store) {
    let mut updates = store.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state: AppState = updates.borrow_and_update().clone();
            tracing::debug!(
                logged_in = state.session.is_logged,
                products_busy = state.products.is_busy(),
                users_busy = state.users.is_busy(),
                "State published"
            );
        }
    });
}
