use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use playground::model::{FormFields, ValidationError};

#[derive(Parser, Debug)]
#[command(name = "playground", version, about = "Client for the DummyJSON demo REST API")]
pub struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL from config
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Product catalogue
    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },
    /// User directory
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Sign in and store the access token
    SignIn {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored access token
    SignOut,
    /// Show the profile behind the stored token
    Whoami,
    /// Show login state and file locations
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    List(ListArgs),
    Get { id: u64 },
    Create(FieldArgs),
    Update {
        id: u64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    Delete { id: u64 },
    Count,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(ListArgs),
    Get { id: u64 },
    Create(FieldArgs),
    Update {
        id: u64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    Count,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// 1-based page; zero or negative means the first page
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Records per page (defaults to `paging.per_page`)
    #[arg(long)]
    pub per_page: Option<u32>,
}

#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Form field, repeatable: `-f title=Phone -f price=99`
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

impl FieldArgs {
    pub fn form(&self) -> Result<FormFields, ValidationError> {
        FormFields::parse_pairs(self.fields.iter().map(String::as_str))
    }
}
