use std::path::PathBuf;

use clap::Parser;

/// Queries a DuckDB or MotherDuck data source from the command line
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub enum Command {
    /// Tests the connection, as "save & test" does
    Check(Args),
    /// Lists the tables on the search path
    Tables(Args),
    /// Lists the columns of a table
    Fields(FieldsArgs),
    /// Runs a literal SQL query
    Query(QueryArgs),
    /// Renders a builder query (json) as SQL
    RawSql(RawSqlArgs),
}

#[derive(Parser, Debug)]
pub struct Args {
    /// The path of the data source settings file
    #[clap(short, long, value_parser)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct FieldsArgs {
    #[clap(flatten)]
    pub args: Args,
    #[clap(short, long)]
    pub table: String,
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    #[clap(flatten)]
    pub args: Args,
    #[clap(short, long)]
    pub sql: String,
}

#[derive(Parser, Debug)]
pub struct RawSqlArgs {
    #[clap(flatten)]
    pub args: Args,
    /// Path of a file holding the query json
    #[clap(short, long, value_parser)]
    pub query: PathBuf,
}

impl Command {
    pub fn args(&self) -> &Args {
        match self {
            Command::Check(args) => args,
            Command::Tables(args) => args,
            Command::Fields(FieldsArgs { args, .. }) => args,
            Command::Query(QueryArgs { args, .. }) => args,
            Command::RawSql(RawSqlArgs { args, .. }) => args,
        }
    }
}
