use clap::{Parser, Subcommand};

/// Lists the database backups stored in an S3 bucket.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Bucket to look in, overrides S3_BUCKET_NAME
    #[arg(short, long, global = true)]
    pub bucket: Option<String>,

    /// AWS region, overrides AWS_S3_REGION_NAME
    #[arg(short, long, global = true)]
    pub region: Option<String>,

    /// S3 compatible endpoint, overrides AWS_ENDPOINT
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the backup files found in the bucket
    List {
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_arguments() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod test {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn should_parse_list_with_overrides() {
        let cli = Cli::parse_from(["backup-lister", "list", "--json", "--bucket", "b"]);

        assert_eq!(cli.bucket.as_deref(), Some("b"));
        assert!(matches!(cli.command, Some(Commands::List { json: true })));
    }
}
